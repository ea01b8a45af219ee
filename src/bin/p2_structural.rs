// Pattern 2: Structural Patterns - Decorator
// Prices decorated pizzas. Topping names after the flags are looked up in the
// menu, e.g. `p2_structural --menu menu.toml cheese olives`.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use pizza_patterns::{
    BasicPizza, CheeseDecorator, Component, Decorator, Menu, Pepperoni, PepperoniDecorator,
};

fn show(title: &str, pizza: &dyn Component) {
    println!("{}", title.bold());
    println!("{}", pizza.description());
    println!("Cost: {}", pizza.cost().to_string().green());
}

fn scenario_example() {
    let basic = BasicPizza::default();
    show("Basic Pizza:", &basic);

    let cheese = CheeseDecorator::wrap(basic);
    println!();
    show("Pizza with Cheese:", &cheese);

    let deluxe = PepperoniDecorator::wrap(cheese);
    println!();
    show("Deluxe Pizza:", &deluxe);
}

fn reversed_order_example() {
    let forward = PepperoniDecorator::wrap(CheeseDecorator::wrap(BasicPizza::default()));
    let reversed = CheeseDecorator::wrap(Decorator::new(BasicPizza::default(), Pepperoni));

    show("Cheese then Pepperoni:", &forward);
    show("Pepperoni then Cheese:", &reversed);
    println!("Same cost: {}", forward.cost() == reversed.cost());
}

fn menu_example(menu: &Menu, toppings: &[String]) -> Result<()> {
    let chain = menu
        .decorate(toppings)
        .with_context(|| format!("decorating with {toppings:?}"))?;
    show("Your Pizza:", &*chain);
    Ok(())
}

fn main() -> Result<()> {
    let mut menu_path = None;
    let mut verbose = false;
    let mut toppings = Vec::new();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--menu" => menu_path = Some(PathBuf::from(args.next().context("--menu needs a path")?)),
            "-v" | "--verbose" => verbose = true,
            _ => toppings.push(arg),
        }
    }

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    println!("Pattern 2: Structural Patterns");
    println!("===============================\n");

    println!("=== Decorator (step by step) ===");
    scenario_example();
    println!();

    println!("=== Decorator (wrap order) ===");
    reversed_order_example();
    println!();

    let menu = match menu_path {
        Some(path) => Menu::load(&path).with_context(|| format!("loading {}", path.display()))?,
        None => Menu::builtin(),
    };
    if toppings.is_empty() {
        toppings = vec!["cheese".to_string(), "pepperoni".to_string()];
    }
    println!("=== Decorator (from menu) ===");
    menu_example(&menu, &toppings)?;

    Ok(())
}
