use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Company as returned by list and create.
#[derive(ToSchema)]
pub struct CompanyDoc {
    pub name: String,
    #[schema(example = "Hiring")]
    pub status: String,
    pub notes: String,
    pub application_link: String,
}

#[derive(ToSchema)]
pub struct CreateCompanyDoc {
    pub name: String,
    /// One of the configured statuses; defaults to the configured default.
    pub status: Option<String>,
    pub notes: Option<String>,
    pub application_link: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::companies::list,
        crate::routes::companies::create,
    ),
    components(
        schemas(
            HealthResponse,
            CompanyDoc,
            CreateCompanyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "companies")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_company_paths() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/companies/"));
        assert!(paths.contains_key("/health"));
        assert!(doc["paths"]["/companies/"]["post"].is_object());
        assert!(doc["components"]["schemas"]["CompanyDoc"].is_object());
    }
}
