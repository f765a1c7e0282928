use crate::domain::model::AnalysisReport;
use std::fmt;

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "In {}:", self.query.neighborhood)?;
        writeln!(f, "Cheapest Option URL: {}", self.cheapest.url)?;
        writeln!(f, "The cheapest option costs ${:.2}", self.cheapest.price)?;
        writeln!(f)?;
        writeln!(f, "Safest Option URL: {}", self.safest.url)?;
        writeln!(
            f,
            "Nearest incident to the safest option: {:.4}°",
            self.safest.nearest_incident_distance
        )?;
        writeln!(f)?;

        let comparison = &self.comparison;
        writeln!(f, "To accommodate {} people:", self.query.capacity)?;
        writeln!(
            f,
            "{} had an average price of ${:.2}",
            comparison.chosen.name, comparison.chosen.mean_price
        )?;
        match &comparison.most_similar {
            Some(similar) => writeln!(
                f,
                "The most similar location is {} with an average price of ${:.2}",
                similar.name, similar.mean_price
            )?,
            None => writeln!(f, "No other neighborhood has listings for this group size")?,
        }
        writeln!(
            f,
            "{} is the most expensive at ${:.2}",
            comparison.most_expensive.name, comparison.most_expensive.mean_price
        )?;
        write!(
            f,
            "{} is the cheapest at ${:.2}",
            comparison.cheapest.name, comparison.cheapest.mean_price
        )?;

        if !comparison.excluded.is_empty() {
            write!(
                f,
                "\nNo listings for this group size in: {}",
                comparison.excluded.join(", ")
            )?;
        }

        Ok(())
    }
}
