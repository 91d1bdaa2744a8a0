//! [`Rest`] backend running against an in-process HTTP server.

use std::{collections::HashMap, io::Cursor};

use axum::{
    extract::{Multipart, Query},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse as _, Response},
    routing::{get, post},
    Json, Router,
};
use common::pagination::Arguments;
use serde_json::json;
use service::{
    command::{CreateUserSession, UploadImage},
    domain::{
        upload::{Area, Selected, Target},
        user::session::{Credentials, Token},
        Agency, Property,
    },
    infra::{backend::Authorize as _, rest, Rest},
    query::resource::{All, List},
    Command as _, Config, Query as _, Service,
};
use tokio::net::TcpListener;

const TOKEN: &str = "t0k3n";

/// Serves the provided [`Router`] on a random local port, returning an
/// anonymous [`Rest`] client of it.
async fn serve(app: Router) -> Rest {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(tokio::spawn(async move { axum::serve(listener, app).await }));
    Rest::new(&rest::Config {
        base_url: format!("http://{addr}/"),
        timeout: None,
    })
    .unwrap()
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok())
        == Some(&format!("Bearer {TOKEN}"))
}

async fn agencies(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !is_authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let page = query["page"].parse::<i64>().unwrap();
    Json(json!({
        "content": [{"id": page, "name": format!("Agencia {}", query["limit"])}],
        "totalElements": 12,
        "totalPages": 2,
    }))
    .into_response()
}

fn service(rest: Rest) -> Service<Rest> {
    Service::new(Config::default(), rest)
}

#[tokio::test]
async fn pages_with_bearer_token() {
    let rest = serve(Router::new().route("/api/agencies", get(agencies))).await;
    let svc = service(rest.authorized(Token::from(TOKEN.to_owned())));

    let page = svc
        .execute(List::<Agency>::by(Arguments::new(1, 10).unwrap()))
        .await
        .unwrap();

    assert_eq!(page.items[0].id.get(), 2);
    assert_eq!(page.items[0].name, "Agencia 10");
    assert_eq!(page.total, 12);
    assert!(!page.pager().has_next());
}

#[tokio::test]
async fn reports_rejected_credentials() {
    let rest = serve(Router::new().route("/api/agencies", get(agencies))).await;
    let svc = service(rest.anonymous());

    let err = svc
        .execute(List::<Agency>::by(Arguments::first(10)))
        .await
        .unwrap_err();

    assert!(err.as_ref().is_unauthorized());
    assert_eq!(err.as_ref().message(), "Error al obtener agencias");
}

#[tokio::test]
async fn accepts_bare_arrays() {
    let rest = serve(Router::new().route(
        "/api/properties",
        get(|| async {
            Json(json!([
                {"id": 1, "title": "Departamento en Miraflores"},
                {"id": 2, "title": "Casa en La Molina"},
            ]))
        }),
    ))
    .await;

    let all = service(rest).execute(All::<Property>::by(())).await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all[1].title, "Casa en La Molina");
}

#[tokio::test]
async fn logs_in_anonymously() {
    let rest = serve(Router::new().route(
        "/api/auth/login",
        post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
            if headers.contains_key(AUTHORIZATION)
                || body["password"] != "secreta1"
            {
                return StatusCode::BAD_REQUEST.into_response();
            }
            Json(json!({
                "token": TOKEN,
                "user": {"id": 3, "name": "Luis", "email": body["email"]},
            }))
            .into_response()
        }),
    ))
    .await;
    let svc = service(rest.authorized(Token::from("stale".to_owned())));

    let session = svc
        .execute(CreateUserSession::from(Credentials::new(
            "luis@correo.pe",
            "secreta1",
        )))
        .await
        .unwrap();

    assert_eq!(session.user.email, "luis@correo.pe");
}

#[tokio::test]
async fn uploads_multipart_image() {
    let rest = serve(Router::new().route(
        "/api/agencies/upload-logo",
        post(|mut form: Multipart| async move {
            let mut fields = HashMap::new();
            while let Some(field) = form.next_field().await.unwrap() {
                let name = field.name().unwrap_or_default().to_owned();
                let value = match field.file_name() {
                    Some(file) => {
                        let file = file.to_owned();
                        let ty = field.content_type().unwrap_or_default().to_owned();
                        format!("{file} ({ty})")
                    }
                    None => field.text().await.unwrap(),
                };
                _ = fields.insert(name, value);
            }
            Json(json!({"fileUrl": format!(
                "/uploads/{} <- {}",
                fields["file"], fields["previousUrl"],
            )}))
        }),
    ))
    .await;
    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(image::RgbImage::new(8, 8))
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let image = Selected::new("logo.png", "image/png", png)
        .unwrap()
        .crop(Area::centered_square(8, 8))
        .unwrap();

    let url = service(rest)
        .execute(UploadImage {
            target: Target::AgencyLogo,
            image,
            previous_url: Some("/uploads/old.png".into()),
        })
        .await
        .unwrap();

    assert_eq!(
        String::from(url),
        "/uploads/logo.png (image/png) <- /uploads/old.png",
    );
}
