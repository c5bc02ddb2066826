use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct RevenueSlice {
    #[schema(example = "Product", value_type = String)]
    pub name: &'static str,
    #[schema(example = 400)]
    pub value: u32,
}

/// Fixed figures for the dashboard widgets; nothing here is read from the database.
#[derive(Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_users: u32,
    pub today_sales: u32,
    pub total_revenue: u32,
    pub pending_tasks: u32,
    /// one entry per month, January first
    pub monthly_sales: Vec<u32>,
    /// one entry per month, January first
    pub users_per_month: Vec<u32>,
    pub revenue_split: Vec<RevenueSlice>,
}

static STATS: Lazy<DashboardStats> = Lazy::new(|| DashboardStats {
    total_users: 1250,
    today_sales: 87,
    total_revenue: 54_300,
    pending_tasks: 14,
    monthly_sales: vec![120, 135, 150, 170, 160, 180, 210, 205, 190, 220, 240, 260],
    users_per_month: vec![40, 55, 60, 72, 80, 95, 110, 105, 98, 120, 130, 145],
    revenue_split: vec![
        RevenueSlice { name: "Product", value: 400 },
        RevenueSlice { name: "Services", value: 300 },
        RevenueSlice { name: "Subscriptions", value: 300 },
    ],
});

#[utoipa::path(
    get,
    path = "/dashboard/stats",
    responses(
        (status = 200, description = "Static dashboard figures", body = DashboardStats)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_stats() -> HttpResponse {
    HttpResponse::Ok().json(&*STATS)
}
