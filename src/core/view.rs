use crate::core::selector::CascadingSelector;
use crate::domain::model::Level;
use crate::utils::currency::AmountFormatter;
use std::fmt;

pub const LOADING_LABEL: &str = "Loading...";
pub const NO_ITEM_LABEL: &str = "No item selected";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    fn loading() -> Self {
        Self {
            value: String::new(),
            label: LOADING_LABEL.to_string(),
            disabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    pub label: &'static str,
    pub options: Vec<SelectOption>,
    pub selected: String,
    pub disabled: bool,
}

impl SelectField {
    fn build<'a>(
        selector: &CascadingSelector,
        level: Level,
        selected: String,
        entries: impl Iterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let (label, placeholder) = match level {
            Level::Country => ("Country", "Select Country"),
            Level::Port => ("Port", "Select Port"),
            Level::Item => ("Items", "Select Item"),
        };

        let mut options = vec![SelectOption::new("", placeholder)];
        if selector.is_loading(level) {
            options.push(SelectOption::loading());
        } else {
            options.extend(entries.map(|(value, text)| SelectOption::new(value, text)));
        }

        Self {
            label,
            options,
            selected,
            disabled: !selector.is_enabled(level),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.options.iter().any(|o| o.disabled && o.label == LOADING_LABEL)
    }
}

/// 表單目前的顯示內容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub country: SelectField,
    pub port: SelectField,
    pub item: SelectField,
    pub description: String,
    pub discount: String,
    pub price: String,
    pub total: String,
    pub reset_enabled: bool,
}

impl FormView {
    pub fn render(selector: &CascadingSelector, formatter: &dyn AmountFormatter) -> Self {
        let selection = selector.selection();
        let id_text = |id: Option<&crate::domain::model::EntityId>| {
            id.map(|i| i.as_str().to_string()).unwrap_or_default()
        };

        let country = SelectField::build(
            selector,
            Level::Country,
            id_text(selection.country.as_ref()),
            selector
                .countries()
                .iter()
                .map(|c| (c.id.as_str(), c.display_name.as_str())),
        );
        let port = SelectField::build(
            selector,
            Level::Port,
            id_text(selection.port.as_ref()),
            selector
                .ports()
                .iter()
                .map(|p| (p.id.as_str(), p.display_name.as_str())),
        );
        let item = SelectField::build(
            selector,
            Level::Item,
            id_text(selection.item.as_ref().map(|i| &i.id)),
            selector
                .items()
                .iter()
                .map(|i| (i.id.as_str(), i.display_name.as_str())),
        );

        // 零值與未選擇一樣顯示空白
        let non_zero = |v: f64| if v == 0.0 { None } else { Some(v) };
        let chosen = selection.item.as_ref();

        Self {
            country,
            port,
            item,
            description: chosen
                .map(|i| i.description.clone().unwrap_or_default())
                .unwrap_or_else(|| NO_ITEM_LABEL.to_string()),
            discount: chosen
                .and_then(|i| non_zero(i.discount_percent))
                .map(|d| format!("{}%", d))
                .unwrap_or_default(),
            price: chosen
                .and_then(|i| non_zero(i.unit_price))
                .map(|p| formatter.format(p))
                .unwrap_or_default(),
            total: selection
                .total
                .and_then(non_zero)
                .map(|t| formatter.format(t))
                .unwrap_or_default(),
            reset_enabled: selector.can_reset(),
        }
    }
}

impl fmt::Display for SelectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.disabled { " (disabled)" } else { "" };
        writeln!(f, "{}{}:", self.label, state)?;
        for option in &self.options {
            let marker = if !option.value.is_empty() && option.value == self.selected {
                '*'
            } else {
                ' '
            };
            if option.value.is_empty() {
                writeln!(f, "  {}   {}", marker, option.label)?;
            } else {
                writeln!(f, "  {} [{}] {}", marker, option.value, option.label)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Search Item =====")?;
        write!(f, "{}", self.country)?;
        write!(f, "{}", self.port)?;
        write!(f, "{}", self.item)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Discount : {}", self.discount)?;
        writeln!(f, "Price : {}", self.price)?;
        writeln!(f, "Total : {}", self.total)?;
        let reset = if self.reset_enabled { "" } else { " (disabled)" };
        write!(f, "[Reset]{}", reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Country, EntityId, Item, Port};
    use crate::utils::currency::RupiahFormatter;

    fn id(raw: &str) -> EntityId {
        EntityId::parse(raw).unwrap()
    }

    fn render(selector: &CascadingSelector) -> FormView {
        FormView::render(selector, &RupiahFormatter)
    }

    #[test]
    fn test_initial_view_shows_loading_countries() {
        let selector = CascadingSelector::new();
        let view = render(&selector);

        assert!(view.country.is_loading());
        assert_eq!(view.country.options.len(), 2);
        assert_eq!(view.country.options[0].label, "Select Country");
        assert!(view.port.disabled);
        assert!(view.item.disabled);
        assert_eq!(view.description, NO_ITEM_LABEL);
        assert_eq!(view.total, "");
        assert!(!view.reset_enabled);
    }

    #[test]
    fn test_view_of_selected_item() {
        let mut selector = CascadingSelector::new();
        let t = selector.begin_countries();
        selector.complete_countries(
            &t,
            Ok(vec![Country {
                id: id("1"),
                display_name: "Indonesia".to_string(),
            }]),
        );
        let t = selector.on_country_change("1").unwrap().unwrap();
        let port_view = render(&selector);
        assert!(port_view.port.is_loading());
        assert!(!port_view.port.disabled);

        selector.complete_ports(
            &t,
            Ok(vec![Port {
                id: id("10"),
                display_name: "Jakarta".to_string(),
                country_id: id("1"),
            }]),
        );
        let t = selector.on_port_change("10").unwrap().unwrap();
        selector.complete_items(
            &t,
            Ok(vec![Item {
                id: id("5"),
                display_name: "Rice".to_string(),
                port_id: id("10"),
                unit_price: 100000.0,
                discount_percent: 10.0,
                description: Some("Premium rice".to_string()),
            }]),
        );
        selector.on_item_change("5").unwrap();

        let view = render(&selector);
        assert_eq!(view.country.selected, "1");
        assert_eq!(view.port.selected, "10");
        assert_eq!(view.item.selected, "5");
        assert_eq!(view.item.options[1].label, "Rice");
        assert_eq!(view.description, "Premium rice");
        assert_eq!(view.discount, "10%");
        assert_eq!(view.price, "Rp100.000");
        assert_eq!(view.total, "Rp90.000");
        assert!(view.reset_enabled);

        let text = view.to_string();
        assert!(text.contains("* [5] Rice"));
        assert!(text.contains("Total : Rp90.000"));
    }
}
