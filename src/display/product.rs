//! Product display formatting

use tabled::Tabled;

use crate::models::Product;
use crate::score::{self, Score};

use super::{or_dash, table};

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Nom")]
    name: String,
    #[tabled(rename = "Marque")]
    brand: String,
    #[tabled(rename = "Code-barres")]
    barcode: String,
    #[tabled(rename = "Nutri")]
    nutri: &'static str,
    #[tabled(rename = "Eco")]
    eco: &'static str,
    #[tabled(rename = "Nova")]
    nova: &'static str,
    #[tabled(rename = "Unité")]
    unit: String,
}

fn glyph(score: Option<Score>) -> &'static str {
    score::style_for(score).glyph
}

/// Format products as a table
pub fn format_product_list(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found.".to_string();
    }

    let rows = products
        .iter()
        .map(|p| ProductRow {
            id: p.id.to_string(),
            name: p.name.clone(),
            brand: or_dash(p.brand.as_deref()),
            barcode: or_dash(p.barcode.as_deref()),
            nutri: glyph(p.nutri_score()),
            eco: glyph(p.eco_score()),
            nova: glyph(p.nova_score()),
            unit: p.unit_type.to_string(),
        })
        .collect();

    table(rows)
}

/// Format a single product's details
pub fn format_product_details(product: &Product, item_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Product: {}\n", product.name));
    output.push_str(&format!("  ID:          {}\n", product.id));
    output.push_str(&format!("  Brand:       {}\n", or_dash(product.brand.as_deref())));
    output.push_str(&format!("  Category:    {}\n", or_dash(product.category.as_deref())));
    output.push_str(&format!("  Barcode:     {}\n", or_dash(product.barcode.as_deref())));
    output.push_str(&format!("  Unit:        {}\n", product.unit_type));

    let scores = [
        ("Nutri-Score", product.nutri_score()),
        ("Eco-Score", product.eco_score()),
        ("Nova", product.nova_score()),
    ];
    for (label, value) in scores {
        let style = score::style_for(value);
        output.push_str(&format!(
            "  {:<12} {} ({})\n",
            format!("{}:", label),
            style.glyph,
            style.background.hex()
        ));
    }

    output.push_str(&format!("  In stock:    {} item(s)\n", item_count));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UnitType;
    use crate::score::{Grade, NovaGroup};

    #[test]
    fn test_empty_list() {
        assert_eq!(format_product_list(&[]), "No products found.");
    }

    #[test]
    fn test_list_shows_glyphs() {
        let mut product = Product::new("Compote", UnitType::G);
        product.nutriscore = Some(Grade::A);
        product.nova_group = Some(NovaGroup::Group2);

        let output = format_product_list(&[product]);
        assert!(output.contains("Compote"));
        assert!(output.contains("Nutri"));
        assert!(output.contains(" A "));
        assert!(output.contains(" 2 "));
        assert!(output.contains(" ? "));
    }

    #[test]
    fn test_details() {
        let mut product = Product::new("Compote", UnitType::G);
        product.barcode = Some("12345678".into());

        let output = format_product_details(&product, 2);
        assert!(output.contains("Barcode:     12345678"));
        assert!(output.contains("Nutri-Score: ? (#9CA3AF)"));
        assert!(output.contains("In stock:    2 item(s)"));
    }
}
