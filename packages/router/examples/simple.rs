//! Drive a router from the command line against an in-memory history.
//!
//! ```sh
//! RUST_LOG=rsv_router=debug cargo run --example simple -- /foo "/baz/123?tab=2" /missing
//! ```

use rsv_history::MemoryHistory;
use rsv_router::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), RouterError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut router = Router::with_config(MemoryHistory::default().shared(), RouterConfig::from_env()?)
        .route(Route::new("/", |_| String::from("Home")))
        .route(Route::new("/foo", |_| String::from("Foo")))
        .route(Route::new("/baz/:id", |ctx| {
            format!("Baz #{}", ctx.get_param("id").unwrap_or_default())
        }))
        .route(Route::fallback(|ctx| format!("Nothing at {}", ctx.path())));
    router.mount()?;

    let ctx = router.context();
    for target in std::env::args().skip(1) {
        ctx.navigate(&target, NavigateOptions::default());
        println!(
            "{target:<20} -> {} (query: {:?})",
            router.render().unwrap_or_default(),
            ctx.query()
        );
    }

    router.unmount()
}
