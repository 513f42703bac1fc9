//! Challenge Page
//!
//! The login prompt returned whenever no valid session is recognized.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::application::config::GateConfig;

/// Render the challenge document for this configuration.
///
/// A pure function of the config: safe to call repeatedly and concurrently,
/// no shared state. The title and stylesheet come from operator
/// configuration, not from the request.
pub fn challenge_page(config: &GateConfig) -> String {
    let stylesheet = config
        .stylesheet
        .as_deref()
        .filter(|href| !href.is_empty())
        .map(|href| format!("\n\t\t<link rel=\"stylesheet\" href=\"{href}\">"))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
	<head>
		<title>{title}</title>{stylesheet}
	</head>
	<body>
		<dialog id="authdialog" open>
			<h2>{title}</h2>
			<form id="authform" action="{action}" method="post">
				<label for="username">Username</label>
				<input type="text" id="username" name="username">
				<label for="password">Password</label>
				<input type="password" id="password" name="password">
				<input type="submit" value="Authenticate">
			</form>
		</dialog>
	</body>
</html>
"#,
        title = config.auth_title,
        stylesheet = stylesheet,
        action = config.validate_path,
    )
}

/// The full login-challenge response: the page with status 401.
pub fn challenge_response(config: &GateConfig) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        challenge_page(config),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_page_carries_config() {
        let config = GateConfig {
            auth_title: "Who goes there".to_string(),
            validate_path: "/login".to_string(),
            stylesheet: Some("/static/auth.css".to_string()),
            ..Default::default()
        };

        let page = challenge_page(&config);
        assert!(page.contains("<title>Who goes there</title>"));
        assert!(page.contains("<h2>Who goes there</h2>"));
        assert!(page.contains(r#"action="/login""#));
        assert!(page.contains(r#"href="/static/auth.css""#));
        assert!(page.contains(r#"name="username""#));
        assert!(page.contains(r#"name="password""#));
    }

    #[test]
    fn test_challenge_page_without_stylesheet() {
        let page = challenge_page(&GateConfig::default());
        assert!(!page.contains("stylesheet"));
    }

    #[test]
    fn test_empty_stylesheet_is_treated_as_absent() {
        let config = GateConfig {
            stylesheet: Some(String::new()),
            ..Default::default()
        };
        assert!(!challenge_page(&config).contains("stylesheet"));
    }

    #[test]
    fn test_challenge_response_is_unauthorized_html() {
        let response = challenge_response(&GateConfig::default());
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }
}
