use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PizzaError, Result};
use crate::price::Price;

// ============================================================================
// Component
// ============================================================================

pub trait Component {
    fn description(&self) -> String;
    fn cost(&self) -> Price;
}

impl<C: Component + ?Sized> Component for Box<C> {
    fn description(&self) -> String {
        (**self).description()
    }

    fn cost(&self) -> Price {
        (**self).cost()
    }
}

impl<C: Component + ?Sized> Component for &C {
    fn description(&self) -> String {
        (**self).description()
    }

    fn cost(&self) -> Price {
        (**self).cost()
    }
}

/// The undecorated pizza: "Pizza" for $5.00 unless configured otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicPizza {
    pub description: String,
    pub price: Price,
}

impl BasicPizza {
    pub fn new(description: impl Into<String>, price: Price) -> Self {
        Self {
            description: description.into(),
            price,
        }
    }
}

impl Default for BasicPizza {
    fn default() -> Self {
        Self::new("Pizza", Price::from_cents(500))
    }
}

impl Component for BasicPizza {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn cost(&self) -> Price {
        self.price
    }
}

// ============================================================================
// Decorator kinds
// ============================================================================

/// What a decorator adds: a label appended to the description and a fixed
/// surcharge added to the cost.
pub trait Topping {
    fn label(&self) -> &str;
    fn surcharge(&self) -> Price;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cheese;

impl Topping for Cheese {
    fn label(&self) -> &str {
        "Cheese"
    }

    fn surcharge(&self) -> Price {
        Price::from_cents(150)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pepperoni;

impl Topping for Pepperoni {
    fn label(&self) -> &str {
        "Pepperoni"
    }

    fn surcharge(&self) -> Price {
        Price::from_cents(200)
    }
}

/// A topping defined at runtime, usually from a menu file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTopping {
    pub label: String,
    pub surcharge: Price,
}

impl CustomTopping {
    pub fn new(label: impl Into<String>, surcharge: Price) -> Self {
        Self {
            label: label.into(),
            surcharge,
        }
    }
}

impl Topping for CustomTopping {
    fn label(&self) -> &str {
        &self.label
    }

    fn surcharge(&self) -> Price {
        self.surcharge
    }
}

// ============================================================================
// Decorator
// ============================================================================

/// Wraps exactly one inner component, set once at construction.
pub struct Decorator<T> {
    inner: Box<dyn Component>,
    topping: T,
}

pub type CheeseDecorator = Decorator<Cheese>;
pub type PepperoniDecorator = Decorator<Pepperoni>;

impl<T: Topping> Decorator<T> {
    pub fn new(inner: impl Component + 'static, topping: T) -> Self {
        Self {
            inner: Box::new(inner),
            topping,
        }
    }

    /// Like [`Decorator::new`] for callers whose inner component may be
    /// missing.
    pub fn try_wrap(inner: Option<Box<dyn Component>>, topping: T) -> Result<Self> {
        let inner = inner.ok_or_else(|| PizzaError::null_inner(topping.label()))?;
        Ok(Self { inner, topping })
    }

    pub fn inner(&self) -> &dyn Component {
        self.inner.as_ref()
    }

    pub fn topping(&self) -> &T {
        &self.topping
    }
}

impl<T: Topping + Default> Decorator<T> {
    pub fn wrap(inner: impl Component + 'static) -> Self {
        Self::new(inner, T::default())
    }
}

impl<T: Topping> Component for Decorator<T> {
    fn description(&self) -> String {
        format!("{}, {}", self.inner.description(), self.topping.label())
    }

    fn cost(&self) -> Price {
        self.inner.cost() + self.topping.surcharge()
    }
}

impl<T: Topping> fmt::Debug for Decorator<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Decorator")
            .field("description", &self.description())
            .field("cost", &self.cost())
            .finish()
    }
}

// ============================================================================
// Runtime chain assembly
// ============================================================================

/// Assembles a chain from a base and a list of toppings, applied in the
/// order they were added.
#[derive(Default)]
pub struct ChainBuilder {
    base: Option<Box<dyn Component>>,
    toppings: Vec<Box<dyn Topping>>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, base: impl Component + 'static) -> Self {
        self.base = Some(Box::new(base));
        self
    }

    pub fn topping(mut self, topping: impl Topping + 'static) -> Self {
        self.toppings.push(Box::new(topping));
        self
    }

    pub fn build(self) -> Result<Box<dyn Component>> {
        let mut chain = self.base;
        for topping in self.toppings {
            let layer: Box<dyn Component> = Box::new(Decorator::try_wrap(chain, topping)?);
            chain = Some(layer);
        }
        chain.ok_or_else(|| PizzaError::null_inner("a pizza"))
    }
}

impl Topping for Box<dyn Topping> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn surcharge(&self) -> Price {
        (**self).surcharge()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basic_pizza() {
        let pizza = BasicPizza::default();
        assert_eq!(pizza.description(), "Pizza");
        assert_eq!(pizza.cost(), Price::from_cents(500));
    }

    #[test]
    fn test_scenario_chain() {
        let basic = BasicPizza::default();
        assert_eq!(basic.cost().to_string(), "$5.00");

        let cheese = CheeseDecorator::wrap(basic);
        assert_eq!(cheese.description(), "Pizza, Cheese");
        assert_eq!(cheese.cost(), Price::from_cents(650));

        let deluxe = PepperoniDecorator::wrap(cheese);
        assert_eq!(deluxe.description(), "Pizza, Cheese, Pepperoni");
        assert_eq!(deluxe.cost(), Price::from_cents(850));
    }

    #[test]
    fn test_wrap_order_changes_description_not_cost() {
        let a = PepperoniDecorator::wrap(CheeseDecorator::wrap(BasicPizza::default()));
        let b = CheeseDecorator::wrap(PepperoniDecorator::wrap(BasicPizza::default()));

        assert_eq!(a.cost(), b.cost());
        assert_eq!(b.description(), "Pizza, Pepperoni, Cheese");
        assert_ne!(a.description(), b.description());
    }

    #[test]
    fn test_try_wrap_without_inner() {
        let err = CheeseDecorator::try_wrap(None, Cheese).unwrap_err();
        assert_eq!(
            err,
            PizzaError::NullInnerComponent {
                label: "Cheese".to_string()
            }
        );
    }

    #[test]
    fn test_builder_needs_base() {
        let result = ChainBuilder::new().topping(Cheese).build();
        assert!(matches!(result, Err(PizzaError::NullInnerComponent { .. })));

        let result = ChainBuilder::new().build();
        assert!(matches!(result, Err(PizzaError::NullInnerComponent { .. })));
    }

    #[test]
    fn test_builder_with_custom_topping() {
        let chain = ChainBuilder::new()
            .base(BasicPizza::default())
            .topping(Cheese)
            .topping(CustomTopping::new("Mushrooms", Price::from_cents(75)))
            .build()
            .unwrap();

        assert_eq!(chain.description(), "Pizza, Cheese, Mushrooms");
        assert_eq!(chain.cost(), Price::from_cents(725));
    }

    #[test]
    fn test_reading_through_a_reference() {
        let cheese = CheeseDecorator::wrap(BasicPizza::default());
        let borrowed: &dyn Component = &cheese;
        assert_eq!(borrowed.description(), "Pizza, Cheese");
        assert_eq!(cheese.inner().description(), "Pizza");
    }

    #[test]
    fn test_decorating_a_borrowed_base() {
        let shared: &'static BasicPizza = Box::leak(Box::new(BasicPizza::default()));
        let cheese = CheeseDecorator::wrap(shared);
        let deluxe = PepperoniDecorator::wrap(shared);

        assert_eq!(cheese.description(), "Pizza, Cheese");
        assert_eq!(cheese.cost(), Price::from_cents(650));
        assert_eq!(deluxe.description(), "Pizza, Pepperoni");
        assert_eq!(shared.cost(), Price::from_cents(500));
    }

    fn topping_strategy() -> impl Strategy<Value = CustomTopping> {
        ("[A-Z][a-z]{2,8}", 0u64..1_000).prop_map(|(label, cents)| {
            CustomTopping::new(label, Price::from_cents(cents))
        })
    }

    proptest! {
        #[test]
        fn cost_is_independent_of_wrap_order(
            base_cents in 0u64..10_000,
            toppings in prop::collection::vec(topping_strategy(), 0..8),
        ) {
            let base = BasicPizza::new("Pizza", Price::from_cents(base_cents));
            let expected = base.cost() + toppings.iter().map(|t| t.surcharge).sum::<Price>();

            let forward = toppings
                .iter()
                .cloned()
                .fold(ChainBuilder::new().base(base.clone()), |b, t| b.topping(t))
                .build()
                .unwrap();
            let reversed = toppings
                .iter()
                .rev()
                .cloned()
                .fold(ChainBuilder::new().base(base), |b, t| b.topping(t))
                .build()
                .unwrap();

            prop_assert_eq!(forward.cost(), expected);
            prop_assert_eq!(reversed.cost(), expected);
        }

        #[test]
        fn description_lists_innermost_first(
            toppings in prop::collection::vec(topping_strategy(), 0..8),
        ) {
            let chain = toppings
                .iter()
                .cloned()
                .fold(ChainBuilder::new().base(BasicPizza::default()), |b, t| b.topping(t))
                .build()
                .unwrap();

            let mut expected = String::from("Pizza");
            for topping in &toppings {
                expected.push_str(", ");
                expected.push_str(&topping.label);
            }
            prop_assert_eq!(chain.description(), expected);
        }
    }
}
