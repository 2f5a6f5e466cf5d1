pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::payment_method_service::PaymentMethodService;
use application::sale_service::SaleService;
use infrastructure::payment_method_repo::DieselPaymentMethodCatalog;
use infrastructure::sale_repo::DieselSaleRepository;

pub use db::{create_pool, DbPool};

/// Concrete service types wired over the Diesel adapters.
pub type AppSaleService = SaleService<DieselSaleRepository, DieselPaymentMethodCatalog>;
pub type AppPaymentMethodService = PaymentMethodService<DieselPaymentMethodCatalog>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::sales::create_sale,
        handlers::sales::get_sale,
        handlers::sales::get_sale_by_correlative,
        handlers::sales::confirm_payment,
        handlers::sales::change_status,
        handlers::sales::list_sales,
        handlers::sales::list_sales_by_buyer,
        handlers::sales::list_sales_by_company,
        handlers::sales::list_sales_by_broker,
        handlers::payment_methods::list_payment_methods,
        handlers::payment_methods::list_all_payment_methods,
        handlers::payment_methods::get_payment_method,
    ),
    components(schemas(
        handlers::sales::CreateSaleRequest,
        handlers::sales::CreateSaleLineRequest,
        handlers::sales::ConfirmPaymentRequest,
        handlers::sales::SaleResponse,
        handlers::sales::SaleLineResponse,
        handlers::sales::ListSalesResponse,
        handlers::payment_methods::PaymentMethodResponse,
        handlers::payment_methods::ListPaymentMethodsResponse,
    )),
    tags(
        (name = "sales", description = "Sale aggregate lifecycle"),
        (name = "payment-methods", description = "Read-only payment-method catalog"),
    )
)]
struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let sale_service = web::Data::new(SaleService::new(
        DieselSaleRepository::new(pool.clone()),
        DieselPaymentMethodCatalog::new(pool.clone()),
    ));
    let payment_method_service = web::Data::new(PaymentMethodService::new(
        DieselPaymentMethodCatalog::new(pool),
    ));
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(sale_service.clone())
            .app_data(payment_method_service.clone())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            .service(
                web::scope("/sales")
                    .route("", web::post().to(handlers::sales::create_sale))
                    .route("", web::get().to(handlers::sales::list_sales))
                    .route(
                        "/correlative/{correlative}",
                        web::get().to(handlers::sales::get_sale_by_correlative),
                    )
                    .route(
                        "/buyer/{buyer_id}",
                        web::get().to(handlers::sales::list_sales_by_buyer),
                    )
                    .route(
                        "/company/{company_id}",
                        web::get().to(handlers::sales::list_sales_by_company),
                    )
                    .route(
                        "/broker/{broker_id}",
                        web::get().to(handlers::sales::list_sales_by_broker),
                    )
                    .route("/{id}", web::get().to(handlers::sales::get_sale))
                    .route(
                        "/{id}/payment-confirmation",
                        web::put().to(handlers::sales::confirm_payment),
                    )
                    .route(
                        "/{id}/status/{new_status}",
                        web::put().to(handlers::sales::change_status),
                    ),
            )
            .service(
                web::scope("/payment-methods")
                    .route(
                        "",
                        web::get().to(handlers::payment_methods::list_payment_methods),
                    )
                    .route(
                        "/all",
                        web::get().to(handlers::payment_methods::list_all_payment_methods),
                    )
                    .route(
                        "/{id}",
                        web::get().to(handlers::payment_methods::get_payment_method),
                    ),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
