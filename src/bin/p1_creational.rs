// Pattern 1: Creational Patterns - Simple Factory, Factory Method, Abstract Factory
// Orders pizzas from the built-in stores, or from a menu file with --menu <path>.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use pizza_patterns::{Menu, Pizza, PizzaFactory, PizzaStore, PizzaType, SimplePizzaFactory};

struct Args {
    menu: Option<PathBuf>,
    verbose: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        menu: None,
        verbose: false,
    };
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--menu" => {
                let path = iter.next().context("--menu needs a path")?;
                args.menu = Some(PathBuf::from(path));
            }
            "-v" | "--verbose" => args.verbose = true,
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn print_pizza(pizza: &Pizza) {
    println!("{}", pizza.name().bold());
    for line in pizza.trace() {
        println!("  {line}");
    }
}

fn simple_factory_example() -> Result<()> {
    let factory = SimplePizzaFactory;
    for ty in SimplePizzaFactory::MENU {
        // The simple factory only creates; the caller drives the steps.
        let mut pizza = factory.create_pizza(ty)?;
        pizza.prepare()?;
        pizza.bake()?;
        pizza.cut()?;
        pizza.box_up()?;
        print_pizza(&pizza);
    }
    Ok(())
}

fn store_example(stores: &[PizzaStore]) -> Result<()> {
    for store in stores {
        for &ty in store.menu() {
            let pizza = store
                .order(ty)
                .with_context(|| format!("ordering {ty} at {}", store.name()))?;
            print_pizza(&pizza);
        }
        println!("ordered at {}\n", store.name().cyan());
    }
    Ok(())
}

fn compare_providers_example() -> Result<()> {
    let domino = PizzaStore::domino().order(PizzaType::Cheese)?;
    let hut = PizzaStore::pizza_hut().order(PizzaType::Cheese)?;
    for pizza in [&domino, &hut] {
        println!(
            "{:<24} dough: {:<18} sauce: {}",
            pizza.name(),
            pizza.dough().unwrap_or("-"),
            pizza.sauce().unwrap_or("-")
        );
    }
    Ok(())
}

fn unsupported_example() {
    let store = PizzaStore::domino();
    match store.order(PizzaType::Veggie) {
        Ok(pizza) => println!("unexpected: {}", pizza.name()),
        Err(err) => println!("{} {err}", "rejected:".red()),
    }
}

fn out_of_order_example() -> Result<()> {
    let mut pizza = SimplePizzaFactory.create_pizza(PizzaType::Cheese)?;
    if let Err(err) = pizza.cut() {
        println!("{} {err}", "refused:".yellow());
    }
    println!("{} is still {}", pizza.name(), pizza.stage());
    Ok(())
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    println!("Pattern 1: Creational Patterns");
    println!("===============================\n");

    if let Some(path) = args.menu {
        let menu = Menu::load(&path).with_context(|| format!("loading {}", path.display()))?;
        println!("=== Stores from {} ===", path.display());
        store_example(&menu.stores())?;
        return Ok(());
    }

    println!("=== Simple Factory ===");
    simple_factory_example()?;
    println!();

    println!("=== Factory Method + Abstract Factory ===");
    store_example(&[PizzaStore::domino(), PizzaStore::pizza_hut()])?;

    println!("=== Ingredient Providers ===");
    compare_providers_example()?;
    println!();

    println!("=== Unsupported Type ===");
    unsupported_example();
    println!();

    println!("=== Out-of-order Step ===");
    out_of_order_example()?;

    Ok(())
}
