use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{PizzaError, Result};
use crate::ingredients::{DominoIngredients, IngredientProvider, PizzaHutIngredients};
use crate::pizza::{Pizza, PizzaType, Recipe};

/// The factory method: map a type tag to a freshly created pizza.
pub trait PizzaFactory {
    fn create_pizza(&self, pizza_type: PizzaType) -> Result<Pizza>;
}

// ============================================================================
// Simple factory
// ============================================================================

/// Builds house-recipe pizzas named after their type. Callers drive the
/// lifecycle themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplePizzaFactory;

impl SimplePizzaFactory {
    pub const MENU: [PizzaType; 2] = [PizzaType::Cheese, PizzaType::Pepperoni];
}

impl PizzaFactory for SimplePizzaFactory {
    fn create_pizza(&self, pizza_type: PizzaType) -> Result<Pizza> {
        match pizza_type {
            PizzaType::Cheese | PizzaType::Pepperoni => Ok(Pizza::new(
                format!("{pizza_type} Pizza"),
                pizza_type,
                Recipe::House,
            )),
            other => Err(PizzaError::unsupported("SimplePizzaFactory", other)),
        }
    }
}

// ============================================================================
// Store: factory method plus injected ingredient factory
// ============================================================================

#[derive(Clone)]
pub struct PizzaStore {
    name: String,
    menu: Vec<PizzaType>,
    provider: Option<Arc<dyn IngredientProvider>>,
}

impl PizzaStore {
    /// A store making cheese and pepperoni pizza from house recipes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            menu: SimplePizzaFactory::MENU.to_vec(),
            provider: None,
        }
    }

    pub fn domino() -> Self {
        Self::new("Domino").with_provider(Arc::new(DominoIngredients))
    }

    pub fn pizza_hut() -> Self {
        Self::new("PizzaHut").with_provider(Arc::new(PizzaHutIngredients))
    }

    pub fn with_provider(mut self, provider: Arc<dyn IngredientProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replaces the set of pizza types this store accepts.
    pub fn supporting(mut self, menu: impl IntoIterator<Item = PizzaType>) -> Self {
        self.menu.clear();
        for pizza_type in menu {
            if !self.menu.contains(&pizza_type) {
                self.menu.push(pizza_type);
            }
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn menu(&self) -> &[PizzaType] {
        &self.menu
    }

    pub fn provider(&self) -> Option<&Arc<dyn IngredientProvider>> {
        self.provider.as_ref()
    }

    pub fn supports(&self, pizza_type: PizzaType) -> bool {
        self.menu.contains(&pizza_type)
    }

    /// Creates a pizza and takes it through prepare, bake, cut and box.
    pub fn order(&self, pizza_type: PizzaType) -> Result<Pizza> {
        let mut pizza = self.create_pizza(pizza_type).inspect_err(|err| {
            warn!(store = %self.name, error = %err, "order rejected");
        })?;
        pizza.prepare()?;
        pizza.bake()?;
        pizza.cut()?;
        pizza.box_up()?;
        info!(store = %self.name, pizza = %pizza.name(), "order ready");
        Ok(pizza)
    }
}

impl PizzaFactory for PizzaStore {
    fn create_pizza(&self, pizza_type: PizzaType) -> Result<Pizza> {
        if !self.supports(pizza_type) {
            return Err(PizzaError::unsupported(&self.name, pizza_type));
        }
        let recipe = match &self.provider {
            Some(provider) => Recipe::Sourced(Arc::clone(provider)),
            None => Recipe::House,
        };
        Ok(Pizza::new(
            format!("{} {} Pizza", self.name, pizza_type),
            pizza_type,
            recipe,
        ))
    }
}

impl fmt::Debug for PizzaStore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PizzaStore")
            .field("name", &self.name)
            .field("menu", &self.menu)
            .field("provider", &self.provider.as_ref().map(|p| p.brand()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredients::Ingredients;
    use crate::pizza::Stage;
    use std::thread;

    #[test]
    fn test_simple_factory_names() {
        let factory = SimplePizzaFactory;
        for ty in SimplePizzaFactory::MENU {
            let pizza = factory.create_pizza(ty).unwrap();
            assert_eq!(pizza.name(), format!("{ty} Pizza"));
            assert_eq!(pizza.stage(), Stage::Created);
        }
    }

    #[test]
    fn test_simple_factory_rejects_unsupported() {
        let err = SimplePizzaFactory.create_pizza(PizzaType::Veggie).unwrap_err();
        assert_eq!(
            err,
            PizzaError::unsupported("SimplePizzaFactory", PizzaType::Veggie)
        );
    }

    #[test]
    fn test_store_names_match_brand_and_type() {
        let cases = [
            (PizzaStore::domino(), PizzaType::Cheese, "Domino Cheese Pizza"),
            (PizzaStore::domino(), PizzaType::Pepperoni, "Domino Pepperoni Pizza"),
            (PizzaStore::pizza_hut(), PizzaType::Cheese, "PizzaHut Cheese Pizza"),
            (PizzaStore::pizza_hut(), PizzaType::Pepperoni, "PizzaHut Pepperoni Pizza"),
        ];
        for (store, ty, expected) in cases {
            let pizza = store.order(ty).unwrap();
            assert_eq!(pizza.name(), expected);
            assert_eq!(pizza.pizza_type(), ty);
            assert_eq!(pizza.stage(), Stage::Boxed);
        }
    }

    #[test]
    fn test_store_rejects_unsupported_types() {
        for store in [PizzaStore::domino(), PizzaStore::pizza_hut()] {
            for ty in [PizzaType::Veggie, PizzaType::Clam] {
                let err = store.order(ty).unwrap_err();
                assert_eq!(err, PizzaError::unsupported(store.name(), ty));
            }
        }
    }

    #[test]
    fn test_providers_change_ingredients() {
        let domino = PizzaStore::domino().order(PizzaType::Cheese).unwrap();
        let hut = PizzaStore::pizza_hut().order(PizzaType::Cheese).unwrap();

        assert_eq!(domino.dough(), Some("Thin Crust Dough"));
        assert_eq!(domino.sauce(), Some("Marinara Sauce"));
        assert_eq!(hut.dough(), Some("Thick Crust Dough"));
        assert_eq!(hut.sauce(), Some("Plum Tomato Sauce"));
        assert_ne!(domino.toppings(), hut.toppings());
    }

    #[test]
    fn test_store_without_provider_uses_house_recipe() {
        let pizza = PizzaStore::new("Corner").order(PizzaType::Pepperoni).unwrap();
        assert_eq!(pizza.name(), "Corner Pepperoni Pizza");
        assert_eq!(pizza.dough(), Some("Crust"));
        assert!(matches!(pizza.recipe(), Recipe::House));
    }

    #[test]
    fn test_custom_menu_and_provider() {
        let store = PizzaStore::new("Harbor")
            .supporting([PizzaType::Clam])
            .with_provider(Arc::new(Ingredients::new("Sourdough", "Garlic Oil", &["Clams"])));

        let pizza = store.order(PizzaType::Clam).unwrap();
        assert_eq!(pizza.name(), "Harbor Clam Pizza");
        assert_eq!(pizza.toppings(), ["Clams"]);
        assert!(store.order(PizzaType::Cheese).is_err());
    }

    #[test]
    fn test_order_trace() {
        let pizza = PizzaStore::domino().order(PizzaType::Pepperoni).unwrap();
        assert_eq!(pizza.trace().len(), 5);
        assert_eq!(pizza.trace()[0], "Preparing Domino Pepperoni Pizza");
        assert_eq!(
            pizza.trace()[1],
            "Dough: Thin Crust Dough, Sauce: Marinara Sauce, Toppings: Grated Reggiano Cheese,Fresh Clams,Garlic,Onion"
        );
    }

    #[test]
    fn test_provider_shared_across_threads() {
        let provider: Arc<dyn IngredientProvider> = Arc::new(PizzaHutIngredients);
        let stores: Vec<PizzaStore> = ["North", "South", "East"]
            .into_iter()
            .map(|name| PizzaStore::new(name).with_provider(Arc::clone(&provider)))
            .collect();

        thread::scope(|s| {
            let handles: Vec<_> = stores
                .iter()
                .map(|store| s.spawn(move || store.order(PizzaType::Cheese)))
                .collect();
            for handle in handles {
                let pizza = handle.join().unwrap().unwrap();
                assert_eq!(pizza.dough(), Some("Thick Crust Dough"));
            }
        });
        assert_eq!(Arc::strong_count(&provider), 4);
    }
}
