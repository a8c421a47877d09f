//! Route command handler.

use anyhow::Result;
use bantay_core::router::{Route, View};

/// Prints a view in the same layout the login command uses.
pub fn print_view(route: Route) {
    let View { title, body } = route.view();
    println!("[{route}] {title}");
    println!("  {body}");
}

pub fn show(path: &str) -> Result<()> {
    let Some(route) = Route::from_path(path) else {
        let known = Route::ALL.map(Route::path).join(", ");
        anyhow::bail!("Unknown route '{path}' (expected one of: {known})");
    };
    print_view(route);
    Ok(())
}
