//! Local preferences: search history and theme.

use kronos_client::Storefront;

pub fn add_search(app: &Storefront, term: &str) {
    app.search_history().add_search(term);
    list_searches(app);
}

pub fn list_searches(app: &Storefront) {
    let history = app.search_history().history();
    if history.is_empty() {
        println!("No recent searches");
    }
    for term in history {
        println!("{term}");
    }
}

pub fn clear_searches(app: &Storefront) {
    app.search_history().clear_history();
    println!("Search history cleared");
}

pub fn show_theme(app: &Storefront) {
    println!("{}", app.theme().current());
}

pub fn toggle_theme(app: &Storefront) {
    println!("{}", app.theme().toggle());
}
