//! componentgen-engine binary: the generation entry point executed inside
//! the isolated scope. Spawned by the boundary invoker with a cleared
//! environment; never invoked directly by users.

fn main() {
    componentgen_core::observability::init_tracing();
    let engine = componentgen_engine::DefaultGenerationEngine::with_defaults();
    std::process::exit(componentgen_bridge::entry::serve(&engine));
}
