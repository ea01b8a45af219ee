use serde::{Deserialize, Serialize};

use crate::pizza::PizzaType;

/// Supplies a brand's raw materials. Implementations hold no mutable state
/// and can be shared across stores and threads.
pub trait IngredientProvider: Send + Sync {
    fn brand(&self) -> &str;
    fn dough(&self) -> String;
    fn sauce(&self) -> String;
    fn toppings(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredients {
    pub dough: String,
    pub sauce: String,
    #[serde(default)]
    pub toppings: Vec<String>,
}

impl Ingredients {
    pub fn new(dough: impl Into<String>, sauce: impl Into<String>, toppings: &[&str]) -> Self {
        Self {
            dough: dough.into(),
            sauce: sauce.into(),
            toppings: toppings.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn from_provider(provider: &dyn IngredientProvider) -> Self {
        Self {
            dough: provider.dough(),
            sauce: provider.sauce(),
            toppings: provider.toppings(),
        }
    }

    /// The compiled-in recipe used when a store has no provider.
    pub fn house(pizza_type: PizzaType) -> Self {
        match pizza_type {
            PizzaType::Cheese => Self::new(
                "Regular Crust",
                "Marinara Pizza Sauce",
                &["Fresh Mozzarella", "Parmesan"],
            ),
            PizzaType::Pepperoni => Self::new(
                "Crust",
                "Marinara sauce",
                &["Sliced Pepperoni", "Sliced Onion", "Grated parmesan cheese"],
            ),
            PizzaType::Veggie => Self::new(
                "Crust",
                "Marinara sauce",
                &[
                    "Shredded Mozzarella",
                    "Grated Parmesan",
                    "Diced Onion",
                    "Sliced Mushrooms",
                    "Sliced Red Pepper",
                    "Sliced Black Olives",
                ],
            ),
            PizzaType::Clam => Self::new(
                "Thin crust",
                "White garlic sauce",
                &["Clams", "Grated parmesan cheese"],
            ),
        }
    }
}

/// Configured brands use their [`Ingredients`] directly as the provider.
impl IngredientProvider for Ingredients {
    fn brand(&self) -> &str {
        "configured"
    }

    fn dough(&self) -> String {
        self.dough.clone()
    }

    fn sauce(&self) -> String {
        self.sauce.clone()
    }

    fn toppings(&self) -> Vec<String> {
        self.toppings.clone()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DominoIngredients;

impl IngredientProvider for DominoIngredients {
    fn brand(&self) -> &str {
        "Domino"
    }

    fn dough(&self) -> String {
        "Thin Crust Dough".to_string()
    }

    fn sauce(&self) -> String {
        "Marinara Sauce".to_string()
    }

    fn toppings(&self) -> Vec<String> {
        ["Grated Reggiano Cheese", "Fresh Clams", "Garlic", "Onion"]
            .into_iter()
            .map(String::from)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PizzaHutIngredients;

impl IngredientProvider for PizzaHutIngredients {
    fn brand(&self) -> &str {
        "PizzaHut"
    }

    fn dough(&self) -> String {
        "Thick Crust Dough".to_string()
    }

    fn sauce(&self) -> String {
        "Plum Tomato Sauce".to_string()
    }

    fn toppings(&self) -> Vec<String> {
        ["Shredded Mozzarella Cheese", "Black Olives", "Spinach", "Eggplant"]
            .into_iter()
            .map(String::from)
            .collect()
    }
}
