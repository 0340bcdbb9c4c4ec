use std::{cell::Cell, rc::Rc};

use pretty_assertions::assert_eq;
use rsv_history::{History, MemoryHistory};
use rsv_router::prelude::*;

/// The app every test routes: a couple of static pages, a dynamic one and a fallback.
fn app(history: Rc<dyn History>) -> Router<String> {
    let mut router = Router::new(history)
        .route(Route::new("/foo", |ctx| {
            let link = ctx.href("/bar");
            format!("Foo [{link}]")
        }))
        .route(Route::new("/bar", |_| String::from("Bar")))
        .route(Route::new("/baz/:id", |ctx| {
            ctx.get_param("id").unwrap_or_default()
        }))
        .route(Route::fallback(|_| String::from("Fallback route")));
    router.mount().unwrap();
    router
}

fn go(router: &Router<String>, to: &str) {
    router.context().navigate(to, NavigateOptions::default());
}

#[test]
fn renders_fallback_route_when_no_match() {
    let router = app(MemoryHistory::default().shared());
    go(&router, "/not-a-route");

    assert_eq!(router.render().as_deref(), Some("Fallback route"));
    assert!(matches!(router.context().active(), ActiveRoute::Fallback(_)));
}

#[test]
fn handles_query_parameters() {
    let router = app(MemoryHistory::default().shared());
    let ctx = router.context();
    go(&router, "/foo?bar=baz");

    assert_eq!(router.render().as_deref(), Some("Foo [/bar]"));
    assert_eq!(ctx.path(), "/foo");
    assert_eq!(ctx.get_query_param("bar").as_deref(), Some("baz"));
    assert!(ctx.has_query_param("bar"));
    assert!(!ctx.has_query_param("baz"));
}

#[test]
fn handles_dynamic_segments() {
    let router = app(MemoryHistory::default().shared());
    go(&router, "/baz/123");

    assert_eq!(router.render().as_deref(), Some("123"));
    assert_eq!(router.context().get_param("id").as_deref(), Some("123"));
}

#[test]
fn params_are_cleared_when_leaving_a_dynamic_route() {
    let router = app(MemoryHistory::default().shared());
    let ctx = router.context();

    go(&router, "/baz/123");
    assert_eq!(ctx.params().len(), 1);

    go(&router, "/foo");
    assert!(ctx.params().is_empty());
    assert_eq!(ctx.get_param("id"), None);
}

#[test]
fn can_navigate_between_routes() {
    let router = app(MemoryHistory::default().shared());
    go(&router, "/foo");
    assert_eq!(router.render().as_deref(), Some("Foo [/bar]"));

    go(&router, "/bar");
    assert_eq!(router.render().as_deref(), Some("Bar"));
}

#[test]
fn replace_does_not_grow_the_history() {
    let history = MemoryHistory::default().shared();
    let router = app(history.clone());
    let ctx = router.context();

    ctx.navigate("/about", NavigateOptions::default());
    assert_eq!(ctx.path(), "/about");
    assert_eq!(history.length(), 2);

    ctx.navigate("/foo", NavigateOptions::replace());
    assert_eq!(ctx.path(), "/foo");
    assert_eq!(history.length(), 2);
}

#[test]
fn removing_query_params_replaces_the_entry() {
    let history = MemoryHistory::default().shared();
    let router = app(history.clone());
    let ctx = router.context();

    go(&router, "/foo?bar=baz&keep=1");
    let length = history.length();

    ctx.remove_query_params(["bar"]);

    assert!(!ctx.has_query_param("bar"));
    assert_eq!(ctx.get_query_param("keep").as_deref(), Some("1"));
    assert_eq!(ctx.path(), "/foo");
    assert_eq!(history.location().search, "?keep=1");
    assert_eq!(history.length(), length);

    ctx.remove_query_params(["keep"]);
    assert!(ctx.query().is_empty());
    assert_eq!(history.location().search, "");
}

#[test]
fn duplicate_query_keys_keep_the_last_value() {
    let router = app(MemoryHistory::default().shared());
    go(&router, "/foo?tab=1&tab=2");

    assert_eq!(router.context().get_query_param("tab").as_deref(), Some("2"));
}

#[test]
fn back_and_forward_update_the_context() {
    let router = app(MemoryHistory::default().shared());
    let ctx = router.context();
    let navigator = ctx.navigator();

    go(&router, "/foo");
    go(&router, "/bar");

    navigator.go_back();
    assert_eq!(ctx.path(), "/foo");
    assert_eq!(router.render().as_deref(), Some("Foo [/bar]"));

    navigator.go_forward();
    assert_eq!(router.render().as_deref(), Some("Bar"));
}

#[test]
fn nothing_renders_without_a_match_or_fallback() {
    let mut router: Router<&str> =
        Router::new(MemoryHistory::default().shared()).route(Route::new("/only", |_| "Only"));
    router.mount().unwrap();

    router.context().navigate("/elsewhere", NavigateOptions::default());
    assert_eq!(router.render(), None);
    assert_eq!(router.context().active(), ActiveRoute::None);
}

#[test]
fn fallback_renders_exactly_once() {
    let renders = Rc::new(Cell::new(0));
    let r = renders.clone();

    let mut router = Router::new(MemoryHistory::with_initial_path("/missing").shared())
        .route(Route::fallback(move |_| {
            r.set(r.get() + 1);
            "Fallback"
        }))
        .route(Route::new("*", |_| "Second fallback"))
        .route(Route::new("/present", |_| "Present"));
    router.mount().unwrap();

    assert_eq!(router.render(), Some("Fallback"));
    assert_eq!(renders.get(), 1);
}

#[test]
fn routes_lists_mounted_patterns() {
    let mut router = app(MemoryHistory::default().shared());
    let ctx = router.context();

    assert_eq!(ctx.routes(), vec!["/foo", "/bar", "/baz/:id", "*"]);

    let extra = router.add_route(Route::new("/extra", |_| String::from("Extra")));
    assert_eq!(ctx.routes().len(), 5);

    go(&router, "/extra");
    assert_eq!(router.render().as_deref(), Some("Extra"));

    router.remove_route(extra);
    assert_eq!(ctx.routes().len(), 4);
    assert_eq!(router.render().as_deref(), Some("Fallback route"));
}

#[test]
fn subscribers_see_fully_updated_state() {
    let router = app(MemoryHistory::default().shared());
    let ctx = router.context();
    let seen = Rc::new(std::cell::RefCell::new(Vec::new()));

    let observer = ctx.clone();
    let log = seen.clone();
    let id = ctx.subscribe(move || {
        log.borrow_mut()
            .push((observer.path(), observer.get_param("id")));
    });

    go(&router, "/baz/7");
    ctx.unsubscribe(id);
    go(&router, "/foo");

    assert_eq!(
        *seen.borrow(),
        vec![(String::from("/baz/7"), Some(String::from("7")))]
    );
}

#[test]
fn is_active_tracks_the_current_path() {
    let router = app(MemoryHistory::default().shared());
    let ctx = router.context();
    go(&router, "/baz/1");

    assert!(ctx.is_active("/baz", false));
    assert!(!ctx.is_active("/baz", true));
    assert!(ctx.is_active("/baz/1", true));
}

#[test]
fn on_update_can_redirect() {
    let history = MemoryHistory::default().shared();
    let cfg = RouterConfig::default()
        .on_update(|ctx| (ctx.path() == "/old").then(|| String::from("/new")));
    let mut router = Router::with_config(history.clone(), cfg)
        .route(Route::new("/new", |_| "New"));
    router.mount().unwrap();

    router.context().navigate("/old", NavigateOptions::default());

    assert_eq!(router.render(), Some("New"));
    assert_eq!(history.location().pathname, "/new");
    assert_eq!(history.length(), 2);
}

#[test]
fn prefix_is_stripped_and_restored() {
    let history = MemoryHistory::with_initial_path("/app/foo").shared();
    let mut router = Router::with_config(history.clone(), RouterConfig::default().prefix("/app"))
        .route(Route::new("/foo", |_| "Foo"))
        .route(Route::new("/bar", |_| "Bar"));
    router.mount().unwrap();

    assert_eq!(router.render(), Some("Foo"));

    router.context().navigate("/bar", NavigateOptions::default());
    assert_eq!(router.render(), Some("Bar"));
    assert_eq!(history.location().pathname, "/app/bar");
    assert_eq!(router.context().href("/foo"), "/app/foo");
}

#[test]
fn routes_evaluate_their_own_pattern() {
    let router = app(MemoryHistory::default().shared());
    go(&router, "/baz/42");
    let ctx = router.context();

    let outcomes: Vec<bool> = router.routes().map(|r| r.evaluate(&ctx).matched).collect();
    assert_eq!(outcomes, vec![false, false, true, false]);
}
