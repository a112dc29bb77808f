use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// TODOモデル。
/// JSONはフロントエンドの期待に合わせて camelCase で入出力します。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todo")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// タイトル (必須、最大200文字)
    pub title: String,

    /// 活動種別 (regular: 繰り返し / definite: 期限あり)
    pub activity_type: ActivityType,

    /// 完了状態
    pub completed: bool,

    /// 開始日時 (任意)
    pub start_date: Option<DateTime>,

    /// 終了日時 (definite の場合に使用)
    pub end_date: Option<DateTime>,

    /// リマインダー日時 (任意)
    pub reminder_at: Option<DateTime>,

    /// 所有者のユーザーID (外部キー)
    pub user_id: i32,

    /// 作成日時
    pub created_at: DateTime,

    /// 更新日時
    pub updated_at: DateTime,
}

/// 活動種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[sea_orm(string_value = "regular")]
    Regular,
    #[sea_orm(string_value = "definite")]
    Definite,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::todo_tag::Entity")]
    TodoTags,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::todo_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TodoTags.def()
    }
}

// Tag との多対多 (todo_tag 経由)
impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::todo_tag::Relation::Tag.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::todo_tag::Relation::Todo.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
