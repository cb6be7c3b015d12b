use mongodb::{Client, Database, IndexModel};
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use std::env;

use crate::models::url::ShortLink;
use crate::models::user::User;

/// E11000: a write violated a unique index. Both the link store (racing
/// short codes) and signup (racing emails) branch on this.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_err)) => write_err.code == 11000,
        _ => false,
    }
}

pub async fn get_database() -> mongodb::error::Result<Database> {
    let uri =
        env::var("MONGODB_URI").unwrap_or_else(|_| String::from("mongodb://localhost:27017"));
    let db_name = env::var("DATABASE_NAME").unwrap_or_else(|_| String::from("linkly"));

    let client = Client::with_uri_str(&uri).await?;
    Ok(client.database(&db_name))
}

/// Create the indexes the service depends on. The unique index on
/// `urls.code` is what makes concurrent create calls safe: the second writer
/// of a racing pair gets a duplicate-key error and regenerates.
pub async fn ensure_indexes(db: &Database) -> mongodb::error::Result<()> {
    let unique = IndexOptions::builder().unique(true).build();

    db.collection::<ShortLink>("urls")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "code": 1 })
                .options(unique.clone())
                .build(),
        )
        .await?;

    db.collection::<User>("users")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique)
                .build(),
        )
        .await?;

    Ok(())
}
