use sea_orm::{entity::prelude::*, ActiveModelTrait, ActiveValue::NotSet, Condition, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "song")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub group_name: String,
    pub song_name: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub created_at: DateTimeWithTimeZone,
    pub release_date: String,
    pub link: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Rows addressed by the natural key. Not unique: may match several rows.
pub fn by_name_and_group(song_name: &str, group_name: &str) -> Condition {
    Condition::all()
        .add(Column::SongName.eq(song_name))
        .add(Column::GroupName.eq(group_name))
}

/// Insert a song, leaving `id` and `created_at` to the database defaults.
/// The returned model carries the stored values.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    group_name: &str,
    song_name: &str,
    text: &str,
    release_date: &str,
    link: &str,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        group_name: Set(group_name.to_string()),
        song_name: Set(song_name.to_string()),
        text: Set(text.to_string()),
        created_at: NotSet,
        release_date: Set(release_date.to_string()),
        link: Set(link.to_string()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
