use model_registry::{ModelRegistry, ModelTask};
use std::path::Path;
use std::time::Instant;

fn main() {
    let project_root = Path::new(".");

    println!("Loading canteen models...\n");

    let start = Instant::now();
    let registry = ModelRegistry::load(project_root)
        .expect("Failed to load models");
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    for task in ModelTask::ALL {
        let predictor = registry.get(task);
        let columns = predictor.input_columns().unwrap_or_default();
        println!("{:<12} {:<28} [{}]", task, predictor.name(), columns.join(", "));
    }
}
