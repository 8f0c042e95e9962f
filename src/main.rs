mod api;
mod app_system;
mod clients;
mod domain;
mod form;
mod messages;
mod order_list;
mod pipeline;
mod toast;

#[cfg(test)]
mod mock_framework;


use std::time::Duration;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, Config, OrderflowSystem};
use crate::domain::PaymentMode;
use crate::form::OrderForm;
use crate::order_list::format::{format_currency, format_date};
use crate::order_list::EditorState;
use crate::pipeline::SortField;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting orderflow");

    let config = Config::from_env().map_err(|e| e.to_string())?;
    info!(api_url = %config.api_url, "Configuration loaded");

    let system = OrderflowSystem::new(config);

    // The probe fires immediately; report what it found.
    let mut status_rx = system.api_status.clone();
    match tokio::time::timeout(Duration::from_secs(6), status_rx.changed()).await {
        Ok(Ok(())) => info!(status = ?*status_rx.borrow(), "Backend status"),
        _ => info!("Backend status not determined yet"),
    }

    let span = tracing::info_span!("initial_load");
    let view = async {
        info!("Loading orders");
        system.orders.load().await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(
        order_count = view.stats.total,
        revenue = %format_currency(view.stats.revenue),
        avg_order = %format_currency(view.stats.avg_order),
        unique_customers = view.stats.unique_customers,
        "Order list ready"
    );

    // Walk the view the way a user would: search, filter, sort, page.
    let span = tracing::info_span!("browse");
    async {
        let view = system
            .orders
            .search("upi".to_string())
            .await
            .map_err(|e| e.to_string())?;
        info!(matches = view.filtered_count, "Searched for \"upi\"");

        let view = system
            .orders
            .filter_payment(Some(PaymentMode::Card))
            .await
            .map_err(|e| e.to_string())?;
        info!(matches = view.filtered_count, "Filtered to Card payments");

        system.orders.clear_search().await.map_err(|e| e.to_string())?;
        system
            .orders
            .filter_payment(None)
            .await
            .map_err(|e| e.to_string())?;

        system
            .orders
            .sort_by(SortField::Total)
            .await
            .map_err(|e| e.to_string())?;
        let view = system
            .orders
            .sort_by(SortField::Total)
            .await
            .map_err(|e| e.to_string())?;
        info!(pages = view.total_pages, "Sorted by total, descending");

        let view = system.orders.go_to_page(2).await.map_err(|e| e.to_string())?;
        let (from, to) = view.page_range();
        info!(page = view.current_page, from, to, "Page selected");

        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Create an order through the editor. With no backend running this
    // surfaces an error toast instead of a new row; both outcomes are fine
    // for the demo.
    let span = tracing::info_span!("create_order");
    let result = async {
        // Open, close, then open again: a user changing their mind.
        system.orders.open_create().await.map_err(|e| e.to_string())?;
        system.orders.close_editor().await.map_err(|e| e.to_string())?;
        system.orders.open_create().await.map_err(|e| e.to_string())?;

        let form = OrderForm {
            date_of_purchase: "2025-06-15T10:30".to_string(),
            total: "499.99".to_string(),
            customer_id: "42".to_string(),
            payment_mode: "UPI".to_string(),
            shop_id: "SHOP-7".to_string(),
        };
        system.orders.submit(form).await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await;

    match result {
        Ok(view) => info!(order_count = view.stats.total, "Create flow finished"),
        Err(e) => error!(error = %e, "Create flow failed"),
    }

    // Edit the first visible order, then walk a delete up to the
    // confirmation prompt and back out of it.
    let view = system.orders.load().await.map_err(|e| e.to_string())?;
    if let Some(id) = view.page.first().and_then(|o| o.id) {
        let span = tracing::info_span!("edit_order", order_id = id);
        async {
            let view = system.orders.open_edit(id).await.map_err(|e| e.to_string())?;
            if let EditorState::Editing(order) = &view.editor {
                info!(purchased = %format_date(&order.date_of_purchase), "Editing order");
                let mut form = OrderForm::from_order(order);
                form.total = format!("{}", order.total + 10.0);
                system.orders.submit(form).await.map_err(|e| e.to_string())?;
                info!("Edit submitted");
            }
            Ok::<(), String>(())
        }
        .instrument(span)
        .await?;

        let span = tracing::info_span!("delete_flow", order_id = id);
        async {
            system
                .orders
                .request_delete(id)
                .await
                .map_err(|e| e.to_string())?;
            system.orders.cancel_delete().await.map_err(|e| e.to_string())?;
            info!("Delete requested and cancelled, nothing removed");
            Ok::<(), String>(())
        }
        .instrument(span)
        .await?;
    }

    // Give the toast renderer a moment before tearing everything down.
    tokio::time::sleep(Duration::from_millis(100)).await;

    system.shutdown().await?;

    info!("Orderflow completed successfully");
    Ok(())
}
