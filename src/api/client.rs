//! HTTP API Client
//!
//! Functions for communicating with the reservation backend. All endpoints
//! are same-origin JSON; non-2xx responses optionally carry `{error: string}`
//! and fall back to a generic per-action message when they do not.

use gloo_net::http::Request;

use crate::state::global::{Reservation, Table};

/// Default API base URL (same origin)
pub const DEFAULT_API_BASE: &str = "/api";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("floorplan_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Request / Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct TableListResponse {
    pub tables: Vec<Table>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiError {
    error: String,
}

/// Fields for creating a reservation
#[derive(Debug, Clone, serde::Serialize)]
pub struct NewReservation {
    pub table_id: String,
    pub start_time: String,
    pub guest_name: String,
    pub phone: String,
    pub party_size: u32,
    pub notes: String,
}

/// Fields for editing an active reservation
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReservationUpdate {
    pub start_time: String,
    pub guest_name: String,
    pub phone: String,
    pub party_size: u32,
    pub notes: String,
}

/// Decode the error body of a failed response, falling back to a per-action
/// message when the backend sent none.
async fn error_message(response: gloo_net::http::Response, fallback: &str) -> String {
    match response.json::<ApiError>().await {
        Ok(err) if !err.error.is_empty() => err.error,
        _ => fallback.to_string(),
    }
}

// ============ Snapshot ============

/// Fetch the full table/reservation snapshot
pub async fn fetch_tables() -> Result<Vec<Table>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/tables", api_base))
        .send()
        .await
        .map_err(|e| format!("网络错误: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "无法加载桌位数据").await);
    }

    let result: TableListResponse = response
        .json()
        .await
        .map_err(|e| format!("响应解析失败: {}", e))?;

    Ok(result.tables)
}

// ============ Tables (admin) ============

/// Create a table
pub async fn create_table(floor: &str, name: &str, seats: u32) -> Result<Table, String> {
    #[derive(serde::Serialize)]
    struct CreateTableRequest {
        floor: String,
        name: String,
        seats: u32,
    }

    let api_base = get_api_base();

    let response = Request::post(&format!("{}/admin/tables", api_base))
        .json(&CreateTableRequest {
            floor: floor.to_string(),
            name: name.to_string(),
            seats,
        })
        .map_err(|e| format!("请求构建失败: {}", e))?
        .send()
        .await
        .map_err(|e| format!("网络错误: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "新增桌位失败").await);
    }

    response.json().await.map_err(|e| format!("响应解析失败: {}", e))
}

/// Update a table's name and seat count
pub async fn update_table(table_id: &str, name: &str, seats: u32) -> Result<Table, String> {
    #[derive(serde::Serialize)]
    struct UpdateTableRequest {
        name: String,
        seats: u32,
    }

    let api_base = get_api_base();

    let response = Request::put(&format!("{}/admin/tables/{}", api_base, table_id))
        .json(&UpdateTableRequest {
            name: name.to_string(),
            seats,
        })
        .map_err(|e| format!("请求构建失败: {}", e))?
        .send()
        .await
        .map_err(|e| format!("网络错误: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "更新桌位失败").await);
    }

    response.json().await.map_err(|e| format!("响应解析失败: {}", e))
}

/// Delete a table (and, server-side, its reservations)
pub async fn delete_table(table_id: &str) -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::delete(&format!("{}/admin/tables/{}", api_base, table_id))
        .send()
        .await
        .map_err(|e| format!("网络错误: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "删除桌位失败").await);
    }

    Ok(())
}

// ============ Reservations ============

/// Create a reservation
pub async fn create_reservation(reservation: &NewReservation) -> Result<Reservation, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/reservations", api_base))
        .json(reservation)
        .map_err(|e| format!("请求构建失败: {}", e))?
        .send()
        .await
        .map_err(|e| format!("网络错误: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "创建预定失败").await);
    }

    response.json().await.map_err(|e| format!("响应解析失败: {}", e))
}

/// Edit an active reservation
pub async fn update_reservation(
    reservation_id: &str,
    update: &ReservationUpdate,
) -> Result<Reservation, String> {
    let api_base = get_api_base();

    let response = Request::put(&format!("{}/reservations/{}", api_base, reservation_id))
        .json(update)
        .map_err(|e| format!("请求构建失败: {}", e))?
        .send()
        .await
        .map_err(|e| format!("网络错误: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "更新预定失败").await);
    }

    response.json().await.map_err(|e| format!("响应解析失败: {}", e))
}

/// Cancel a reservation
pub async fn cancel_reservation(reservation_id: &str) -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::delete(&format!("{}/reservations/{}", api_base, reservation_id))
        .send()
        .await
        .map_err(|e| format!("网络错误: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "取消预定失败").await);
    }

    Ok(())
}

/// Clear every reservation
pub async fn clear_reservations() -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::delete(&format!("{}/reservations", api_base))
        .send()
        .await
        .map_err(|e| format!("网络错误: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "清空预定失败").await);
    }

    Ok(())
}

/// Mark a reservation's guest as arrived
pub async fn mark_arrived(reservation_id: &str) -> Result<Reservation, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/reservations/{}/arrive", api_base, reservation_id))
        .send()
        .await
        .map_err(|e| format!("网络错误: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "标记到店失败").await);
    }

    response.json().await.map_err(|e| format!("响应解析失败: {}", e))
}
