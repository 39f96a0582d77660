use core_types::{ClientRevenue, ProductRevenue};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SEPARATOR: &str = "----------------------------------------";

/// The two fixed revenue reports, in the order they are printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueReport {
    /// `None` when no invoice lines exist.
    pub top_product: Option<ProductRevenue>,
    /// Invoiced clients only, highest total first.
    pub clients: Vec<ClientRevenue>,
}

impl RevenueReport {
    pub fn new(top_product: Option<ProductRevenue>, clients: Vec<ClientRevenue>) -> Self {
        Self { top_product, clients }
    }
}

impl fmt::Display for RevenueReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "Most profitable product:")?;
        match &self.top_product {
            Some(product) => writeln!(f, "Product: {}, Revenue: ${:.2}", product.name, product.revenue)?,
            None => writeln!(f, "No products found.")?,
        }

        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "Clients by total billed:")?;
        for client in &self.clients {
            writeln!(f, "Client: {}, Total billed: ${:.2}", client.name, client.total_billed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_renders_product_and_clients_in_order() {
        let report = RevenueReport::new(
            Some(ProductRevenue { name: "Widget".to_string(), revenue: dec!(30) }),
            vec![
                ClientRevenue { name: "B".to_string(), total_billed: dec!(500.5) },
                ClientRevenue { name: "A".to_string(), total_billed: dec!(300.00) },
            ],
        );

        let expected = format!(
            "{SEPARATOR}\nMost profitable product:\nProduct: Widget, Revenue: $30.00\n\
             {SEPARATOR}\nClients by total billed:\n\
             Client: B, Total billed: $500.50\nClient: A, Total billed: $300.00\n"
        );
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn test_renders_no_products_line() {
        let rendered = RevenueReport::default().to_string();
        assert!(rendered.contains("No products found.\n"));
        assert!(!rendered.contains("Client:"));
        assert!(rendered.ends_with("Clients by total billed:\n"));
    }
}
