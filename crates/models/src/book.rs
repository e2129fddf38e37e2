use sea_orm::{entity::prelude::*, ConnectionTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field order here is the JSON field order of `GET /books`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub author: String,
    #[sea_orm(column_type = "Text")]
    pub isbn: String,
    pub publication_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A fully validated book without an id; what create and update write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publication_date: Date,
}

impl NewBook {
    pub fn new(title: &str, author: &str, isbn: &str, publication_date: &str) -> Result<Self, ModelError> {
        validate_required("title", title)?;
        validate_required("author", author)?;
        validate_required("isbn", isbn)?;
        validate_required("publication_date", publication_date)?;
        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            publication_date: parse_publication_date(publication_date)?,
        })
    }

    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            title: Set(self.title),
            author: Set(self.author),
            isbn: Set(self.isbn),
            publication_date: Set(self.publication_date),
            ..Default::default()
        }
    }
}

pub fn validate_required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}

pub fn parse_publication_date(raw: &str) -> Result<Date, ModelError> {
    Date::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ModelError::Validation("publication_date must be a YYYY-MM-DD date".into()))
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find().order_by_asc(Column::Id).all(db).await?;
    Ok(rows)
}

pub async fn exists<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let count = Entity::find_by_id(id).count(db).await?;
    Ok(count > 0)
}

/// Exact match on all four fields: byte equality on text, date equality on the date.
pub async fn find_duplicate<C: ConnectionTrait>(db: &C, book: &NewBook) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::Title.eq(book.title.as_str()))
        .filter(Column::Author.eq(book.author.as_str()))
        .filter(Column::Isbn.eq(book.isbn.as_str()))
        .filter(Column::PublicationDate.eq(book.publication_date))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn insert<C: ConnectionTrait>(db: &C, book: NewBook) -> Result<Model, ModelError> {
    let created = book.into_active_model().insert(db).await?;
    Ok(created)
}

/// Full replace of the four mutable columns in a single conditional
/// statement. Returns false when no row has `id`.
pub async fn replace<C: ConnectionTrait>(db: &C, id: i32, book: NewBook) -> Result<bool, ModelError> {
    let res = Entity::update_many()
        .set(book.into_active_model())
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_accepts_four_non_empty_fields() {
        let book = NewBook::new("Dune", "Herbert", "123", "1965-01-01").unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.publication_date, Date::from_ymd_opt(1965, 1, 1).unwrap());
    }

    #[test]
    fn new_book_rejects_empty_fields() {
        for (t, a, i, d) in [
            ("", "Herbert", "123", "1965-01-01"),
            ("Dune", "", "123", "1965-01-01"),
            ("Dune", "Herbert", "", "1965-01-01"),
            ("Dune", "Herbert", "123", ""),
        ] {
            assert!(matches!(NewBook::new(t, a, i, d), Err(ModelError::Validation(_))));
        }
    }

    #[test]
    fn whitespace_is_not_empty() {
        assert!(validate_required("title", " ").is_ok());
    }

    #[test]
    fn publication_date_must_parse() {
        assert!(parse_publication_date("1965-13-01").is_err());
        assert!(parse_publication_date("yesterday").is_err());
        assert_eq!(
            parse_publication_date("2001-02-03").unwrap(),
            Date::from_ymd_opt(2001, 2, 3).unwrap()
        );
    }

    #[test]
    fn model_serializes_in_column_order() {
        let m = Model {
            id: 1,
            title: "Dune".into(),
            author: "Herbert".into(),
            isbn: "123".into(),
            publication_date: Date::from_ymd_opt(1965, 1, 1).unwrap(),
        };
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"title":"Dune","author":"Herbert","isbn":"123","publication_date":"1965-01-01"}"#
        );
    }
}
