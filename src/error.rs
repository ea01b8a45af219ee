use thiserror::Error;

use crate::pizza::{PizzaType, Stage};

pub type Result<T, E = PizzaError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PizzaError {
    #[error("{store} does not make {pizza_type} pizza")]
    UnsupportedType { store: String, pizza_type: PizzaType },

    #[error("unknown pizza type: '{0}'")]
    UnknownPizzaType(String),

    #[error("cannot add {label} without an inner component")]
    NullInnerComponent { label: String },

    #[error("cannot move {pizza} to {step} while it is {stage}")]
    OutOfOrder {
        pizza: String,
        step: Stage,
        stage: Stage,
    },

    #[error("invalid price {0}: expected a non-negative amount in whole cents")]
    InvalidPrice(f64),

    #[error("unknown topping: '{0}'")]
    UnknownTopping(String),

    #[error("unknown store: '{0}'")]
    UnknownStore(String),
}

impl PizzaError {
    pub fn unsupported(store: impl Into<String>, pizza_type: PizzaType) -> Self {
        Self::UnsupportedType {
            store: store.into(),
            pizza_type,
        }
    }

    pub fn null_inner(label: impl Into<String>) -> Self {
        Self::NullInnerComponent {
            label: label.into(),
        }
    }
}
