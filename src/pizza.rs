use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PizzaError, Result};
use crate::ingredients::{IngredientProvider, Ingredients};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PizzaType {
    Cheese,
    Pepperoni,
    Veggie,
    Clam,
}

impl PizzaType {
    pub const ALL: [PizzaType; 4] = [
        PizzaType::Cheese,
        PizzaType::Pepperoni,
        PizzaType::Veggie,
        PizzaType::Clam,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PizzaType::Cheese => "Cheese",
            PizzaType::Pepperoni => "Pepperoni",
            PizzaType::Veggie => "Veggie",
            PizzaType::Clam => "Clam",
        }
    }
}

impl fmt::Display for PizzaType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PizzaType {
    type Err = PizzaError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        PizzaType::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PizzaError::UnknownPizzaType(s.to_string()))
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Where a pizza is in `Created -> Prepared -> Baked -> Cut -> Boxed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Created,
    Prepared,
    Baked,
    Cut,
    Boxed,
}

impl Stage {
    fn predecessor(self) -> Option<Stage> {
        match self {
            Stage::Created => None,
            Stage::Prepared => Some(Stage::Created),
            Stage::Baked => Some(Stage::Prepared),
            Stage::Cut => Some(Stage::Baked),
            Stage::Boxed => Some(Stage::Cut),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Stage::Created => "created",
            Stage::Prepared => "prepared",
            Stage::Baked => "baked",
            Stage::Cut => "cut",
            Stage::Boxed => "boxed",
        };
        f.write_str(name)
    }
}

/// How a pizza gets its ingredients when it is prepared.
#[derive(Clone)]
pub enum Recipe {
    /// The compiled-in recipe for the pizza's type.
    House,
    /// Ingredients sourced from a brand's provider.
    Sourced(Arc<dyn IngredientProvider>),
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Recipe::House => f.write_str("House"),
            Recipe::Sourced(provider) => write!(f, "Sourced({})", provider.brand()),
        }
    }
}

// ============================================================================
// Product
// ============================================================================

#[derive(Debug, Clone)]
pub struct Pizza {
    name: String,
    pizza_type: PizzaType,
    recipe: Recipe,
    ingredients: Option<Ingredients>,
    stage: Stage,
    trace: Vec<String>,
}

impl Pizza {
    pub fn new(name: impl Into<String>, pizza_type: PizzaType, recipe: Recipe) -> Self {
        Self {
            name: name.into(),
            pizza_type,
            recipe,
            ingredients: None,
            stage: Stage::Created,
            trace: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pizza_type(&self) -> PizzaType {
        self.pizza_type
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Ingredients recorded by [`Pizza::prepare`]; `None` before that.
    pub fn ingredients(&self) -> Option<&Ingredients> {
        self.ingredients.as_ref()
    }

    pub fn dough(&self) -> Option<&str> {
        self.ingredients.as_ref().map(|i| i.dough.as_str())
    }

    pub fn sauce(&self) -> Option<&str> {
        self.ingredients.as_ref().map(|i| i.sauce.as_str())
    }

    pub fn toppings(&self) -> &[String] {
        self.ingredients
            .as_ref()
            .map(|i| i.toppings.as_slice())
            .unwrap_or(&[])
    }

    /// Human-readable lines recorded by each lifecycle step.
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    pub fn prepare(&mut self) -> Result<()> {
        if !self.advance(Stage::Prepared)? {
            return Ok(());
        }
        let ingredients = match &self.recipe {
            Recipe::House => Ingredients::house(self.pizza_type),
            Recipe::Sourced(provider) => Ingredients::from_provider(provider.as_ref()),
        };
        self.record(format!("Preparing {}", self.name));
        self.record(format!(
            "Dough: {}, Sauce: {}, Toppings: {}",
            ingredients.dough,
            ingredients.sauce,
            ingredients.toppings.join(",")
        ));
        self.ingredients = Some(ingredients);
        Ok(())
    }

    pub fn bake(&mut self) -> Result<()> {
        if self.advance(Stage::Baked)? {
            self.record("Bake for 25 minutes at 350".to_string());
        }
        Ok(())
    }

    pub fn cut(&mut self) -> Result<()> {
        if self.advance(Stage::Cut)? {
            self.record("Cutting the pizza into diagonal slices".to_string());
        }
        Ok(())
    }

    /// Named `box_up` since `box` is a reserved word.
    pub fn box_up(&mut self) -> Result<()> {
        if self.advance(Stage::Boxed)? {
            self.record("Place pizza in official PizzaStore box".to_string());
        }
        Ok(())
    }

    /// Moves to `next` if the pizza sits right before it. Returns `false`
    /// when `next` is the stage already reached, so repeats are no-ops.
    fn advance(&mut self, next: Stage) -> Result<bool> {
        if self.stage == next {
            return Ok(false);
        }
        if next.predecessor() != Some(self.stage) {
            return Err(PizzaError::OutOfOrder {
                pizza: self.name.clone(),
                step: next,
                stage: self.stage,
            });
        }
        self.stage = next;
        Ok(true)
    }

    fn record(&mut self, line: String) {
        debug!(pizza = %self.name, stage = %self.stage, "{}", line);
        self.trace.push(line);
    }
}
