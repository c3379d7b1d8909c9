//! Integration test support for the KronosTech storefront client.
//!
//! [`MockBackend`] is an in-process stand-in for the REST backend: an axum
//! router on an ephemeral localhost port that speaks the same envelopes,
//! keeps a small mutable data set, and records every request it receives.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kronos-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use kronos_client::{ClientConfig, ClientStorage, Storefront};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

pub const CUSTOMER_EMAIL: &str = "ana@kronostech.pe";
pub const CUSTOMER_PASSWORD: &str = "secreto123";
pub const CUSTOMER_TOKEN: &str = "tok-ana-7";
pub const CUSTOMER_ID: i32 = 7;

/// Sellable variant in the mock catalog.
#[derive(Debug, Clone, Copy)]
pub struct Variant {
    pub id: i32,
    pub name: &'static str,
    pub sku: &'static str,
    pub price: i64,
    pub stock: i32,
}

pub const KEYBOARD: Variant = Variant {
    id: 5,
    name: "Teclado mecánico",
    sku: "TEC-01",
    price: 150,
    stock: 3,
};

pub const MOUSE: Variant = Variant {
    id: 6,
    name: "Mouse inalámbrico",
    sku: "MOU-02",
    price: 60,
    stock: 10,
};

const CATALOG: [Variant; 2] = [KEYBOARD, MOUSE];

/// One request as seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub id: i32,
    pub variant_id: i32,
    pub quantity: i32,
}

/// Mutable backend state. Tests may inspect or rig it through
/// [`MockBackend::data`].
#[derive(Debug)]
pub struct BackendData {
    pub cart: Vec<CartLine>,
    next_line_id: i32,
    /// key -> (value, type tag)
    pub config: BTreeMap<String, (String, String)>,
    /// When false every `/config` route answers 503.
    pub config_available: bool,
    /// When false `/auth/logout` answers 500.
    pub logout_available: bool,
    pub logs: Vec<Value>,
    next_log_id: u32,
    pub requests: Vec<RecordedRequest>,
}

impl Default for BackendData {
    fn default() -> Self {
        let config = [
            ("site_name", "KronosTech Perú", "string"),
            ("currency", "PEN", "string"),
            ("tax_rate", "0.18", "number"),
            ("free_shipping_threshold", "250", "number"),
            ("enable_reviews", "false", "boolean"),
            ("session_timeout", "12", "number"),
            ("maintenance_banner", "off", "string"),
        ]
        .into_iter()
        .map(|(k, v, t)| (k.to_owned(), (v.to_owned(), t.to_owned())))
        .collect();

        Self {
            cart: Vec::new(),
            next_line_id: 100,
            config,
            config_available: true,
            logout_available: true,
            logs: Vec::new(),
            next_log_id: 1,
            requests: Vec::new(),
        }
    }
}

type Shared = Arc<Mutex<BackendData>>;

fn lock(state: &Shared) -> MutexGuard<'_, BackendData> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// MockBackend
// =============================================================================

/// Running mock backend. The server task stops when this is dropped.
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
    task: JoinHandle<()>,
}

impl MockBackend {
    /// Bind to `127.0.0.1:0` and start serving.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let state = Shared::default();
        let app = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no local address");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state, task }
    }

    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url(),
            state_dir: None,
        }
    }

    /// Client context pointed at this backend.
    #[must_use]
    pub fn storefront(&self, storage: ClientStorage) -> Storefront {
        Storefront::new(&self.client_config(), storage)
    }

    /// Backend state, for inspection or rigging.
    pub fn data(&self) -> MutexGuard<'_, BackendData> {
        lock(&self.state)
    }

    /// Requests received so far for `path` (without the `/api` prefix).
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        let full = format!("/api{path}");
        self.data()
            .requests
            .iter()
            .filter(|r| r.path == full)
            .cloned()
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend")
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Routes
// =============================================================================

fn router(state: Shared) -> Router {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/carrito", get(cart).delete(clear_cart))
        .route("/carrito/items", post(add_item))
        .route("/carrito/items/{id}", patch(update_item).delete(remove_item))
        .route("/familias", get(families))
        .route("/productos", get(products))
        .route("/productos/{id}", get(product))
        .route("/config", get(config_all).put(config_batch))
        .route("/config/{key}", get(config_key).put(config_update))
        .route("/logs", get(logs).post(create_log))
        .route("/logs/limpiar", delete(clear_logs))
        .route("/mis-reembolsos", get(refunds))
        .route("/mis-reembolsos/solicitar", post(request_refund))
        .route("/ventas", get(orders))
        .route("/ventas/{id}", get(order));

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn_with_state(Arc::clone(&state), record))
        .with_state(state)
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_owned(),
        query: request.uri().query().map(str::to_owned),
        authorization: request
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
    };
    lock(&state).requests.push(recorded);
    next.run(request).await
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

fn ok(data: Value) -> Response {
    Json(json!({ "success": true, "data": data })).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {CUSTOMER_TOKEN}"))
}

fn unauthorized() -> Response {
    failure(StatusCode::UNAUTHORIZED, "Token inválido o expirado")
}

fn customer() -> Value {
    json!({
        "id_usuario": CUSTOMER_ID,
        "nombre": "Ana",
        "apellido": "Quispe",
        "email": CUSTOMER_EMAIL,
        "telefono": "999111222",
        "dni": null,
        "rol": "cliente",
        "email_verificado": true,
        "activo": true,
        "fecha_registro": "2025-03-01T10:00:00Z"
    })
}

// ===== Auth =====

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == CUSTOMER_EMAIL && body["password"] == CUSTOMER_PASSWORD {
        ok(json!({ "token": CUSTOMER_TOKEN, "usuario": customer() }))
    } else {
        failure(StatusCode::UNAUTHORIZED, "Credenciales inválidas")
    }
}

async fn me(headers: HeaderMap) -> Response {
    if authorized(&headers) { ok(customer()) } else { unauthorized() }
}

async fn logout(State(state): State<Shared>) -> Response {
    if lock(&state).logout_available {
        Json(json!({ "success": true, "message": "Sesión cerrada" })).into_response()
    } else {
        failure(StatusCode::INTERNAL_SERVER_ERROR, "Error interno")
    }
}

// ===== Cart =====

fn variant(id: i64) -> Option<Variant> {
    CATALOG.into_iter().find(|v| i64::from(v.id) == id)
}

fn cart_json(data: &BackendData) -> Value {
    let mut total_items = 0;
    let mut subtotal = 0;
    let items: Vec<Value> = data
        .cart
        .iter()
        .filter_map(|line| {
            let v = variant(i64::from(line.variant_id))?;
            let line_total = v.price * i64::from(line.quantity);
            total_items += line.quantity;
            subtotal += line_total;
            Some(json!({
                "id_carrito_detalle": line.id,
                "id_producto_detalle": v.id,
                "nombre": v.name,
                "sku": v.sku,
                "imagen_principal": null,
                "precio_unitario": v.price,
                "cantidad": line.quantity,
                "subtotal": line_total,
                "stock_disponible": v.stock
            }))
        })
        .collect();

    json!({
        "id_carrito": 1,
        "id_usuario": CUSTOMER_ID,
        "items": items,
        "total_items": total_items,
        "subtotal": subtotal,
        "fecha_actualizacion": "2026-01-15T12:00:00Z"
    })
}

async fn cart(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    ok(cart_json(&lock(&state)))
}

async fn add_item(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let Some(v) = body["id_producto_detalle"].as_i64().and_then(variant) else {
        return failure(StatusCode::NOT_FOUND, "Producto no encontrado");
    };
    let quantity = i32::try_from(body["cantidad"].as_i64().unwrap_or(1)).unwrap_or(1);

    let mut data = lock(&state);
    let existing = data.cart.iter().position(|l| l.variant_id == v.id);
    let current = existing
        .and_then(|i| data.cart.get(i))
        .map_or(0, |l| l.quantity);
    if current + quantity > v.stock {
        return failure(StatusCode::BAD_REQUEST, "Stock insuficiente");
    }

    if let Some(index) = existing {
        if let Some(line) = data.cart.get_mut(index) {
            line.quantity += quantity;
        }
    } else {
        let id = data.next_line_id;
        data.next_line_id += 1;
        data.cart.push(CartLine {
            id,
            variant_id: v.id,
            quantity,
        });
    }
    ok(cart_json(&data))
}

async fn update_item(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let quantity = i32::try_from(body["cantidad"].as_i64().unwrap_or(0)).unwrap_or(0);

    let mut data = lock(&state);
    let Some(line) = data.cart.iter_mut().find(|l| l.id == id) else {
        return failure(StatusCode::NOT_FOUND, "Item no encontrado");
    };
    let stock = variant(i64::from(line.variant_id)).map_or(0, |v| v.stock);
    if quantity < 1 || quantity > stock {
        return failure(StatusCode::BAD_REQUEST, "Cantidad no válida");
    }
    line.quantity = quantity;
    ok(cart_json(&data))
}

async fn remove_item(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i32>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut data = lock(&state);
    let before = data.cart.len();
    data.cart.retain(|l| l.id != id);
    if data.cart.len() == before {
        return failure(StatusCode::NOT_FOUND, "Item no encontrado");
    }
    ok(cart_json(&data))
}

async fn clear_cart(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut data = lock(&state);
    data.cart.clear();
    ok(cart_json(&data))
}

// ===== Catalog =====

fn product_json(v: Variant) -> Value {
    json!({
        "id_producto_detalle": v.id,
        "nombre": v.name,
        "sku": v.sku,
        "slug": v.sku.to_lowercase(),
        "marca": "Kronos",
        "precio_venta": v.price,
        "precio_base": v.price,
        "stock_disponible": v.stock,
        "es_destacado": v.id == KEYBOARD.id,
        "total_valoraciones": 0,
        "categoria": "Periféricos"
    })
}

async fn families() -> Response {
    ok(json!([
        { "id_familia": 1, "nombre": "Periféricos", "slug": "perifericos", "total_productos": 2 },
        { "id_familia": 2, "nombre": "Laptops", "slug": "laptops", "total_productos": 0 }
    ]))
}

async fn products(Query(params): Query<BTreeMap<String, String>>) -> Response {
    let price = |key: &str| params.get(key).and_then(|p| p.parse::<f64>().ok());
    if let (Some(min), Some(max)) = (price("precio_min"), price("precio_max"))
        && min > max
    {
        return Json(json!({ "success": false, "message": "Rango de precios no válido" })).into_response();
    }
    let featured_only = params.get("destacados").is_some_and(|v| v == "true");
    let data: Vec<Value> = CATALOG
        .into_iter()
        .filter(|v| !featured_only || v.id == KEYBOARD.id)
        .map(product_json)
        .collect();
    let total = data.len();

    Json(json!({
        "success": true,
        "data": data,
        "pagination": {
            "total": total,
            "limit": params.get("limit").and_then(|l| l.parse::<i64>().ok()).unwrap_or(20),
            "offset": 0,
            "total_pages": 1,
            "current_page": 1
        }
    }))
    .into_response()
}

async fn product(Path(id): Path<i64>) -> Response {
    match variant(id) {
        Some(v) => {
            let mut detail = product_json(v);
            detail["descripcion"] = json!("Switches rojos, retroiluminado");
            detail["garantia_meses"] = json!(12);
            ok(detail)
        }
        None => failure(StatusCode::NOT_FOUND, "Producto no encontrado"),
    }
}

// ===== Config =====

async fn config_all(State(state): State<Shared>) -> Response {
    let data = lock(&state);
    if !data.config_available {
        return failure(StatusCode::SERVICE_UNAVAILABLE, "Configuración no disponible");
    }
    let map: serde_json::Map<String, Value> = data
        .config
        .iter()
        .map(|(k, (value, kind))| {
            (
                k.clone(),
                json!({ "valor": value, "tipo": kind, "categoria": "general" }),
            )
        })
        .collect();
    ok(Value::Object(map))
}

async fn config_batch(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut data = lock(&state);
    if !data.config_available {
        return failure(StatusCode::SERVICE_UNAVAILABLE, "Configuración no disponible");
    }
    let entries = body["configuraciones"].as_array().cloned().unwrap_or_default();
    for entry in entries {
        if let (Some(key), Some(value)) = (entry["clave"].as_str(), entry["valor"].as_str()) {
            let kind = data
                .config
                .get(key)
                .map_or_else(|| "string".to_owned(), |(_, kind)| kind.clone());
            data.config.insert(key.to_owned(), (value.to_owned(), kind));
        }
    }
    Json(json!({ "success": true, "message": "Configuración actualizada" })).into_response()
}

async fn config_key(State(state): State<Shared>, Path(key): Path<String>) -> Response {
    let data = lock(&state);
    if !data.config_available {
        return failure(StatusCode::SERVICE_UNAVAILABLE, "Configuración no disponible");
    }
    if key == "session-timeout" {
        let hours = data
            .config
            .get("session_timeout")
            .and_then(|(v, _)| v.parse::<i64>().ok())
            .unwrap_or(0);
        return ok(json!(hours));
    }
    match data.config.get(&key) {
        Some((value, kind)) => ok(json!({ "valor": value, "tipo": kind, "categoria": "general" })),
        None => failure(StatusCode::NOT_FOUND, "Clave no encontrada"),
    }
}

async fn config_update(
    State(state): State<Shared>,
    Path(key): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut data = lock(&state);
    if !data.config_available {
        return failure(StatusCode::SERVICE_UNAVAILABLE, "Configuración no disponible");
    }
    let Some(value) = body["valor"].as_str() else {
        return failure(StatusCode::BAD_REQUEST, "Valor requerido");
    };
    let kind = data
        .config
        .get(&key)
        .map_or_else(|| "string".to_owned(), |(_, kind)| kind.clone());
    data.config.insert(key, (value.to_owned(), kind));
    Json(json!({ "success": true, "message": "Configuración actualizada" })).into_response()
}

// ===== Logs =====

async fn logs(State(state): State<Shared>, Query(params): Query<BTreeMap<String, String>>) -> Response {
    let data = lock(&state);
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(usize::MAX);
    let entries: Vec<Value> = data
        .logs
        .iter()
        .filter(|e| params.get("nivel").is_none_or(|level| e["level"] == level.as_str()))
        .filter(|e| params.get("modulo").is_none_or(|module| e["module"] == module.as_str()))
        .take(limit)
        .cloned()
        .collect();
    ok(Value::Array(entries))
}

async fn create_log(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut data = lock(&state);
    let id = data.next_log_id;
    data.next_log_id += 1;

    let entry = json!({
        "id": id.to_string(),
        "timestamp": format!("2026-01-15T12:00:{:02}Z", id % 60),
        "level": body["nivel"],
        "action": body["accion"],
        "user": body["email_usuario"].as_str().unwrap_or("Sistema"),
        "ip": "127.0.0.1",
        "details": body["detalles"].as_str().unwrap_or_default(),
        "module": body["modulo"]
    });
    data.logs.push(entry.clone());
    ok(entry)
}

async fn clear_logs(State(state): State<Shared>) -> Response {
    lock(&state).logs.clear();
    Json(json!({ "success": true, "message": "Logs eliminados" })).into_response()
}

// ===== Refunds =====

async fn refunds(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([{
        "id_reembolso": 3,
        "numero_pedido": "KT-000040",
        "id_venta": 40,
        "tipo_reembolso": "total",
        "monto_reembolsado": 215,
        "estado": "pendiente",
        "fecha_solicitado": "2026-01-10T09:00:00Z"
    }]))
    .into_response()
}

async fn request_refund(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let amount = body["monto_reembolsado"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .or_else(|| body["monto_reembolsado"].as_f64())
        .unwrap_or(0.0);

    if amount > 215.0 {
        return failure(StatusCode::BAD_REQUEST, "El monto excede el total del pedido");
    }
    if body["id_venta"] != 40 {
        // Some refusals come back in-band with a 200.
        return Json(json!({ "success": false, "message": "Pedido no elegible" })).into_response();
    }
    Json(json!({ "success": true, "message": "Solicitud registrada", "id_reembolso": 9 })).into_response()
}

// ===== Orders =====

fn order_summary(id: i32, status: &str, payment_status: &str, total: i64) -> Value {
    json!({
        "id_venta": id,
        "numero_pedido": format!("KT-{id:06}"),
        "id_usuario": CUSTOMER_ID,
        "nombre_usuario": "Ana Quispe",
        "email_usuario": CUSTOMER_EMAIL,
        "subtotal": total,
        "total": total,
        "estado": status,
        "estado_pago": payment_status,
        "fecha_pedido": "2026-01-05T15:30:00Z"
    })
}

async fn orders(Query(params): Query<BTreeMap<String, String>>) -> Response {
    let all = [
        order_summary(40, "enviado", "pagado", 215),
        order_summary(41, "pendiente", "pendiente", 60),
    ];
    let list: Vec<Value> = all
        .into_iter()
        .filter(|o| params.get("estado").is_none_or(|s| o["estado"] == s.as_str()))
        .filter(|o| params.get("estado_pago").is_none_or(|s| o["estado_pago"] == s.as_str()))
        .collect();
    Json(Value::Array(list)).into_response()
}

async fn order(Path(id): Path<i32>) -> Response {
    if id != 40 {
        return failure(StatusCode::NOT_FOUND, "Venta no encontrada");
    }
    let mut detail = order_summary(40, "enviado", "pagado", 215);
    detail["direccion_envio"] = json!("Av. Arequipa 123");
    detail["ciudad"] = json!("Lima");
    detail["numero_tracking"] = json!("OLV123");
    detail["productos"] = json!([{
        "id_detalle_venta": 1,
        "id_producto": 2,
        "nombre_producto": KEYBOARD.name,
        "sku": KEYBOARD.sku,
        "cantidad": 1,
        "precio_unitario": KEYBOARD.price,
        "subtotal": KEYBOARD.price,
        "imagen_principal": null
    }, {
        "id_detalle_venta": 2,
        "id_producto": 3,
        "nombre_producto": MOUSE.name,
        "sku": MOUSE.sku,
        "cantidad": 1,
        "precio_unitario": 65,
        "subtotal": 65,
        "imagen_principal": null
    }]);
    Json(detail).into_response()
}
