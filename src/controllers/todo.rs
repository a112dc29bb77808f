use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use sea_orm::*;
use serde::{Deserialize, Serialize};
use chrono::Utc;

use crate::entities::{prelude::*, tag, todo};
use crate::entities::todo::ActivityType;
use crate::errors::AppError;
use crate::guards::auth::AuthenticatedUser;
use crate::services::tag_service::TagService;

/// TODO作成・更新リクエスト。
/// PUT では部分更新をサポートするため全フィールドが任意。
/// `tags` が指定された場合はタグ集合を丸ごと置き換える。
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRequest {
    pub title: Option<String>,
    pub activity_type: Option<ActivityType>,
    pub completed: Option<bool>,
    pub start_date: Option<chrono::NaiveDateTime>,
    pub end_date: Option<chrono::NaiveDateTime>,
    pub reminder_at: Option<chrono::NaiveDateTime>,
    pub tags: Option<Vec<String>>,
}

/// タグ付きTODOレスポンス
#[derive(Serialize)]
pub struct TodoWithTags {
    #[serde(flatten)]
    pub todo: todo::Model,
    pub tags: Vec<tag::Model>,
}

fn with_sorted_tags(todo: todo::Model, mut tags: Vec<tag::Model>) -> TodoWithTags {
    tags.sort_by(|a, b| a.name.cmp(&b.name));
    TodoWithTags { todo, tags }
}

/// 自分のTODOを対象にしたベースクエリ
fn scoped(user_id: i32) -> Select<Todo> {
    Todo::find().filter(todo::Column::UserId.eq(user_id))
}

/// TODO一覧 (GET /api/todos)
/// 認証ユーザーが所有するものだけを返す。
#[get("/")]
pub async fn list_todos(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<TodoWithTags>>, AppError> {
    let rows = scoped(user.user.id)
        .find_with_related(Tag)
        .all(db.inner())
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|(todo, tags)| with_sorted_tags(todo, tags))
            .collect(),
    ))
}

/// TODO取得 (GET /api/todos/<id>)
/// 他ユーザーのTODOは存在しないものとして404。
#[get("/<id>")]
pub async fn get_todo(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
    id: i32,
) -> Result<Json<TodoWithTags>, AppError> {
    let todo_item = scoped(user.user.id)
        .filter(todo::Column::Id.eq(id))
        .one(db.inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".to_string()))?;

    let tags = todo_item
        .find_related(Tag)
        .order_by_asc(tag::Column::Name)
        .all(db.inner())
        .await?;

    Ok(Json(TodoWithTags { todo: todo_item, tags }))
}

/// TODO作成 (POST /api/todos)
#[post("/", data = "<request>")]
pub async fn create_todo(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
    request: Json<TodoRequest>,
) -> Result<Json<TodoWithTags>, AppError> {
    let title = request
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| AppError::BadRequest("Title is required".to_string()))?;

    let tags = TagService::resolve_tags(db.inner(), request.tags.as_deref().unwrap_or(&[])).await?;

    let now = Utc::now().naive_utc();

    let new_todo = todo::ActiveModel {
        title: Set(title.to_owned()),
        activity_type: Set(request.activity_type.unwrap_or(ActivityType::Regular)),
        completed: Set(request.completed.unwrap_or(false)),
        start_date: Set(request.start_date),
        end_date: Set(request.end_date),
        reminder_at: Set(request.reminder_at),
        user_id: Set(user.user.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = new_todo.insert(db.inner()).await?;
    TagService::set_todo_tags(db.inner(), created.id, &tags).await?;
    log::info!("Saved todo {} for user '{}'", created.id, user.user.username);

    Ok(Json(with_sorted_tags(created, tags)))
}

/// TODO更新 (PUT /api/todos/<id>)
/// リクエストに含まれるフィールドのみ上書きする部分更新。
#[put("/<id>", data = "<request>")]
pub async fn update_todo(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
    id: i32,
    request: Json<TodoRequest>,
) -> Result<Json<TodoWithTags>, AppError> {
    let existing = scoped(user.user.id)
        .filter(todo::Column::Id.eq(id))
        .one(db.inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".to_string()))?;

    let mut active_model: todo::ActiveModel = existing.into();

    if let Some(title) = request.title.as_deref() {
        if title.trim().is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        active_model.title = Set(title.trim().to_owned());
    }
    if let Some(activity_type) = request.activity_type {
        active_model.activity_type = Set(activity_type);
    }
    if let Some(completed) = request.completed {
        active_model.completed = Set(completed);
    }
    if let Some(start_date) = request.start_date {
        active_model.start_date = Set(Some(start_date));
    }
    if let Some(end_date) = request.end_date {
        active_model.end_date = Set(Some(end_date));
    }
    if let Some(reminder_at) = request.reminder_at {
        active_model.reminder_at = Set(Some(reminder_at));
    }
    active_model.updated_at = Set(Utc::now().naive_utc());

    let updated = active_model.update(db.inner()).await?;

    // タグはリクエストに含まれた場合のみ置き換える
    if let Some(names) = request.tags.as_deref() {
        let tags = TagService::resolve_tags(db.inner(), names).await?;
        TagService::set_todo_tags(db.inner(), updated.id, &tags).await?;
    }

    let tags = updated
        .find_related(Tag)
        .order_by_asc(tag::Column::Name)
        .all(db.inner())
        .await?;
    log::info!("Updated todo {} for user '{}'", updated.id, user.user.username);

    Ok(Json(TodoWithTags { todo: updated, tags }))
}

/// TODO削除 (DELETE /api/todos/<id>)
/// 成功時は 204 No Content。
#[delete("/<id>")]
pub async fn delete_todo(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
    id: i32,
) -> Result<Status, AppError> {
    let result = Todo::delete_many()
        .filter(todo::Column::Id.eq(id))
        .filter(todo::Column::UserId.eq(user.user.id))
        .exec(db.inner())
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Todo not found".to_string()));
    }

    log::info!("Deleted todo {} for user '{}'", id, user.user.username);
    Ok(Status::NoContent)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![list_todos, get_todo, create_todo, update_todo, delete_todo]
}
