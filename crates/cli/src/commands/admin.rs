//! Back-office commands.

use eclat_storefront::AppState;
use eclat_storefront::db::StateRepository;
use eclat_storefront::services::admin::{OrderQuery, StatusFilter};

use super::{eur, order_line};

pub fn orders<R: StateRepository>(state: &AppState<R>, status: StatusFilter, search: Option<String>) {
    let query = OrderQuery { status, search };
    let found = state.admin_orders(&query);
    if found.is_empty() {
        println!("Aucune commande trouvée");
        return;
    }
    for order in found {
        println!("{}", order_line(order));
    }
}

pub fn summary<R: StateRepository>(state: &AppState<R>) {
    let summary = state.dashboard();
    println!("Commandes       : {}", summary.order_count);
    println!("Chiffre d'affaires : {}", eur(summary.revenue));
    println!("Articles vendus : {}", summary.items_sold);
    for (status, count) in summary.by_status {
        println!("  {:<10} {count}", status.label());
    }
    if !summary.recent.is_empty() {
        println!("Commandes récentes :");
        for order in summary.recent {
            println!("  {}", order_line(order));
        }
    }
}
