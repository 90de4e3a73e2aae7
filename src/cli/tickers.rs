use super::ui;
use crate::core::{OTHER_TICKER, TickerCatalog};
use comfy_table::Cell;

pub fn run(catalog: &TickerCatalog) {
    println!("{}", display_catalog(catalog));
}

pub fn display_catalog(catalog: &TickerCatalog) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Ticker"),
        ui::header_cell("Name"),
        ui::header_cell("Provider ID"),
    ]);

    for entry in catalog.entries() {
        table.add_row(vec![
            Cell::new(&entry.symbol),
            Cell::new(&entry.label),
            Cell::new(&entry.provider_id),
        ]);
    }
    table.add_row(vec![
        Cell::new(OTHER_TICKER),
        Cell::new("Other"),
        Cell::new(ui::style_text("enter prices manually", ui::StyleType::Subtle)),
    ]);

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_builtin_and_other() {
        let output = display_catalog(&TickerCatalog::builtin());
        assert!(output.contains("BTC"));
        assert!(output.contains("avalanche-2"));
        assert!(output.contains(OTHER_TICKER));
    }
}
