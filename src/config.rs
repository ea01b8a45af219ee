use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::decorator::{BasicPizza, ChainBuilder, Component, CustomTopping};
use crate::error::PizzaError;
use crate::ingredients::Ingredients;
use crate::pizza::PizzaType;
use crate::price::Price;
use crate::store::PizzaStore;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("failed to read menu at {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {format} menu at line {line}, column {column}: {message}")]
    Parse {
        format: &'static str,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("failed to parse {format} menu: {message}")]
    Syntax {
        format: &'static str,
        message: String,
    },

    #[error("invalid menu field '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Locates a TOML error in `content` from the byte span toml reports.
    fn from_toml(err: toml::de::Error, content: &str) -> Self {
        let message = err.message().to_string();
        let Some(span) = err.span() else {
            return ConfigError::Syntax {
                format: "TOML",
                message,
            };
        };
        let before = content.get(..span.start).unwrap_or(content);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        ConfigError::Parse {
            format: "TOML",
            line,
            column: before[line_start..].chars().count() + 1,
            message,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse {
            format: "JSON",
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Menu model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToppingEntry {
    /// Lookup key, matched case-insensitively.
    pub name: String,
    pub label: String,
    pub price: Price,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreEntry {
    pub name: String,
    pub pizzas: Vec<PizzaType>,
    /// Absent means the store cooks from house recipes.
    #[serde(default)]
    pub ingredients: Option<Ingredients>,
}

impl StoreEntry {
    pub fn to_store(&self) -> PizzaStore {
        let store = PizzaStore::new(&self.name).supporting(self.pizzas.iter().copied());
        match &self.ingredients {
            Some(ingredients) => store.with_provider(Arc::new(ingredients.clone())),
            None => store,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub base: BasicPizza,
    #[serde(default)]
    pub toppings: Vec<ToppingEntry>,
    #[serde(default)]
    pub stores: Vec<StoreEntry>,
}

impl Menu {
    /// Domino and Pizza Hut with their ingredients, plus cheese and
    /// pepperoni toppings over a $5.00 base.
    pub fn builtin() -> Self {
        let topping = |name: &str, label: &str, cents| ToppingEntry {
            name: name.to_string(),
            label: label.to_string(),
            price: Price::from_cents(cents),
        };
        let store = |name: &str, ingredients| StoreEntry {
            name: name.to_string(),
            pizzas: vec![PizzaType::Cheese, PizzaType::Pepperoni],
            ingredients: Some(ingredients),
        };

        Self {
            base: BasicPizza::default(),
            toppings: vec![
                topping("cheese", "Cheese", 150),
                topping("pepperoni", "Pepperoni", 200),
            ],
            stores: vec![
                store(
                    "Domino",
                    Ingredients::new(
                        "Thin Crust Dough",
                        "Marinara Sauce",
                        &["Grated Reggiano Cheese", "Fresh Clams", "Garlic", "Onion"],
                    ),
                ),
                store(
                    "PizzaHut",
                    Ingredients::new(
                        "Thick Crust Dough",
                        "Plum Tomato Sauce",
                        &["Shredded Mozzarella Cheese", "Black Olives", "Spinach", "Eggplant"],
                    ),
                ),
            ],
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let menu: Menu =
            toml::from_str(content).map_err(|err| ConfigError::from_toml(err, content))?;
        menu.validate()?;
        Ok(menu)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let menu: Menu = serde_json::from_str(content)?;
        menu.validate()?;
        Ok(menu)
    }

    /// Loads a menu, picking the format from the extension and falling back
    /// to sniffing the content.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        debug!(path = %path.display(), "loading menu");

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match format.as_deref() {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => {
                let trimmed = content.trim_start();
                if trimmed.starts_with('{') {
                    Self::from_json_str(&content)
                } else {
                    Self::from_toml_str(&content)
                }
            }
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::invalid("menu", err.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base.description.trim().is_empty() {
            return Err(ConfigError::invalid("base.description", "must not be empty"));
        }

        let mut seen = HashSet::new();
        for (i, topping) in self.toppings.iter().enumerate() {
            if topping.name.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("toppings[{i}].name"),
                    "must not be empty",
                ));
            }
            if topping.label.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("toppings[{i}].label"),
                    "must not be empty",
                ));
            }
            if !seen.insert(topping.name.trim().to_ascii_lowercase()) {
                return Err(ConfigError::invalid(
                    format!("toppings[{i}].name"),
                    format!("duplicate topping '{}'", topping.name),
                ));
            }
        }

        let mut seen = HashSet::new();
        for (i, store) in self.stores.iter().enumerate() {
            if store.name.trim().is_empty() {
                return Err(ConfigError::invalid(format!("stores[{i}].name"), "must not be empty"));
            }
            if store.pizzas.is_empty() {
                return Err(ConfigError::invalid(
                    format!("stores[{i}].pizzas"),
                    format!("store '{}' sells no pizza", store.name),
                ));
            }
            if !seen.insert(store.name.trim().to_ascii_lowercase()) {
                return Err(ConfigError::invalid(
                    format!("stores[{i}].name"),
                    format!("duplicate store '{}'", store.name),
                ));
            }
        }
        Ok(())
    }

    pub fn store(&self, name: &str) -> Result<PizzaStore, PizzaError> {
        self.stores
            .iter()
            .find(|entry| entry.name.trim().eq_ignore_ascii_case(name.trim()))
            .map(StoreEntry::to_store)
            .ok_or_else(|| PizzaError::UnknownStore(name.to_string()))
    }

    pub fn stores(&self) -> Vec<PizzaStore> {
        self.stores.iter().map(StoreEntry::to_store).collect()
    }

    pub fn topping(&self, name: &str) -> Result<CustomTopping, PizzaError> {
        self.toppings
            .iter()
            .find(|entry| entry.name.trim().eq_ignore_ascii_case(name.trim()))
            .map(|entry| CustomTopping::new(&entry.label, entry.price))
            .ok_or_else(|| PizzaError::UnknownTopping(name.to_string()))
    }

    /// Builds a chain over the menu's base, applying toppings in order.
    pub fn decorate<S: AsRef<str>>(&self, toppings: &[S]) -> Result<Box<dyn Component>, PizzaError> {
        let mut builder = ChainBuilder::new().base(self.base.clone());
        for name in toppings {
            builder = builder.topping(self.topping(name.as_ref())?);
        }
        builder.build()
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::builtin()
    }
}
