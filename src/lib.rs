//! # Pizza Patterns
//!
//! Creational and structural design patterns, shown on a small pizza
//! ordering domain.
//!
//! ## Pattern 1: Creational Patterns
//! - Simple Factory ([`SimplePizzaFactory`])
//! - Factory Method ([`PizzaFactory`], [`PizzaStore::order`])
//! - Abstract Factory ([`IngredientProvider`] injected into a store)
//!
//! ## Pattern 2: Structural Patterns
//! - Decorator ([`Component`], [`Decorator`], [`ChainBuilder`])
//!
//! Stores and toppings can also be described in a [`Menu`] file.
//!
//! Run the demos with:
//! ```bash
//! cargo run --bin p1_creational
//! cargo run --bin p2_structural
//! ```

pub mod config;
pub mod decorator;
pub mod error;
pub mod ingredients;
pub mod pizza;
pub mod price;
pub mod store;

pub use config::{ConfigError, Menu};
pub use decorator::{
    BasicPizza, ChainBuilder, Cheese, CheeseDecorator, Component, CustomTopping, Decorator,
    Pepperoni, PepperoniDecorator, Topping,
};
pub use error::{PizzaError, Result};
pub use ingredients::{DominoIngredients, IngredientProvider, Ingredients, PizzaHutIngredients};
pub use pizza::{Pizza, PizzaType, Recipe, Stage};
pub use price::Price;
pub use store::{PizzaFactory, PizzaStore, SimplePizzaFactory};
