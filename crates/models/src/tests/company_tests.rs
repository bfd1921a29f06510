use anyhow::Result;

use super::memory_db;
use crate::company::{self, CompanyInput, StatusChoices};
use crate::errors::{FieldError, ModelError};

#[tokio::test]
async fn test_empty_store_lists_nothing() -> Result<()> {
    let db = memory_db().await?;
    assert!(company::list(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_create_then_list_round_trip() -> Result<()> {
    let db = memory_db().await?;
    let new = CompanyInput::named("Amazon").validate(&StatusChoices::default())?;
    let amazon = company::create(&db, new).await?;
    assert_eq!(amazon.name, "Amazon");
    assert_eq!(amazon.status, "Hiring");
    assert_eq!(amazon.notes, "");
    assert_eq!(amazon.application_link, "");

    let listed = company::list(&db).await?;
    assert_eq!(listed.len(), 1);
    let first = &listed[0];
    assert_eq!(first.name, amazon.name);
    assert_eq!(first.status, amazon.status);
    assert_eq!(first.notes, amazon.notes);
    assert_eq!(first.application_link, amazon.application_link);

    assert!(company::delete_by_name(&db, "Amazon").await?);
    assert!(!company::delete_by_name(&db, "Amazon").await?);
    assert!(company::list(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_list_in_insertion_order() -> Result<()> {
    let db = memory_db().await?;
    for name in ["Zoom", "Airbnb", "Moderna"] {
        company::create(&db, CompanyInput::named(name).validate(&StatusChoices::default())?).await?;
    }
    let names: Vec<String> = company::list(&db).await?.into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Zoom", "Airbnb", "Moderna"]);
    Ok(())
}

#[tokio::test]
async fn test_unique_constraint_maps_to_duplicate_error() -> Result<()> {
    let db = memory_db().await?;
    let new = CompanyInput::named("Samsung").validate(&StatusChoices::default())?;
    company::create(&db, new.clone()).await?;

    match company::create(&db, new).await {
        Err(ModelError::Validation(errs)) => {
            assert_eq!(
                errs.get("name"),
                Some(&[FieldError::Duplicate { entity: "company", field: "name" }][..])
            );
        }
        other => panic!("expected duplicate validation error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_name_uniqueness_is_case_sensitive() -> Result<()> {
    let db = memory_db().await?;
    let choices = StatusChoices::default();
    company::create(&db, CompanyInput::named("Samsung").validate(&choices)?).await?;
    company::create(&db, CompanyInput::named("samsung").validate(&choices)?).await?;
    assert!(company::find_by_name(&db, "Samsung").await?.is_some());
    assert!(company::find_by_name(&db, "SAMSUNG").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_serialized_shape_hides_storage_columns() -> Result<()> {
    let db = memory_db().await?;
    let input = CompanyInput {
        status: Some("Layoffs".into()),
        notes: Some("travel sector".into()),
        application_link: Some("https://example.com/jobs".into()),
        ..CompanyInput::named("Expedia")
    };
    let created = company::create(&db, input.validate(&StatusChoices::default())?).await?;
    assert_eq!(
        serde_json::to_string(&created)?,
        r#"{"name":"Expedia","status":"Layoffs","notes":"travel sector","application_link":"https://example.com/jobs"}"#
    );
    Ok(())
}

#[tokio::test]
async fn test_status_column_has_no_default() -> Result<()> {
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let db = memory_db().await?;
    let stmt = Statement::from_string(
        DatabaseBackend::Sqlite,
        "INSERT INTO company (name, last_update) VALUES ('Raw', '2020-04-01T00:00:00+00:00')".to_string(),
    );
    assert!(db.execute(stmt).await.is_err());
    assert!(company::list(&db).await?.is_empty());
    Ok(())
}
