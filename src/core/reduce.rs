//! Arg-min / arg-max reductions where ties keep the earliest element.

pub(crate) fn first_min_by_key<T, I, F>(items: I, mut key: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> f64,
{
    items
        .into_iter()
        .map(|item| {
            let k = key(&item);
            (item, k)
        })
        .reduce(|best, next| if next.1 < best.1 { next } else { best })
        .map(|(item, _)| item)
}

pub(crate) fn first_max_by_key<T, I, F>(items: I, mut key: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> f64,
{
    items
        .into_iter()
        .map(|item| {
            let k = key(&item);
            (item, k)
        })
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
        .map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_keep_first_occurrence() {
        let values = [("a", 3.0), ("b", 1.0), ("c", 1.0), ("d", 3.0)];
        assert_eq!(first_min_by_key(values.iter(), |v| v.1).unwrap().0, "b");
        assert_eq!(first_max_by_key(values.iter(), |v| v.1).unwrap().0, "a");
    }

    #[test]
    fn test_empty_input_yields_none() {
        let empty: Vec<f64> = Vec::new();
        assert!(first_min_by_key(empty.iter(), |v| **v).is_none());
        assert!(first_max_by_key(empty.iter(), |v| **v).is_none());
    }
}
