use sea_orm::*;
use crate::entities::{prelude::*, tag, todo_tag};
use crate::errors::AppError;

/// サジェストで返す最大件数
const SUGGEST_LIMIT: u64 = 10;

/// タグ関連のビジネスロジックを集約するサービス。
/// タグ名は常に trim + 小文字化した正規形で保存・比較します。
pub struct TagService;

impl TagService {
    /// タグ名を正規化する。空になったものは None
    fn normalize(raw: &str) -> Option<String> {
        let name = raw.trim().to_lowercase();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// タグ名のリストをタグモデルに解決する。
    /// 存在しないタグはその場で作成する (find-or-create)。
    pub async fn resolve_tags(
        db: &DatabaseConnection,
        names: &[String],
    ) -> Result<Vec<tag::Model>, AppError> {
        let mut tags: Vec<tag::Model> = Vec::new();

        for raw in names {
            let name = match Self::normalize(raw) {
                Some(name) => name,
                None => continue,
            };
            // 同一リクエスト内の重複は一度だけ扱う
            if tags.iter().any(|t| t.name == name) {
                continue;
            }

            let existing = Tag::find()
                .filter(tag::Column::Name.eq(name.as_str()))
                .one(db)
                .await?;

            let tag = match existing {
                Some(tag) => tag,
                None => {
                    let new_tag = tag::ActiveModel {
                        name: Set(name.clone()),
                        ..Default::default()
                    };
                    let created = new_tag.insert(db).await?;
                    log::info!("Created tag '{}'", created.name);
                    created
                }
            };
            tags.push(tag);
        }

        Ok(tags)
    }

    /// TODOに紐づくタグ集合を置き換える。
    pub async fn set_todo_tags(
        db: &DatabaseConnection,
        todo_id: i32,
        tags: &[tag::Model],
    ) -> Result<(), AppError> {
        TodoTag::delete_many()
            .filter(todo_tag::Column::TodoId.eq(todo_id))
            .exec(db)
            .await?;

        if tags.is_empty() {
            return Ok(());
        }

        let relations: Vec<todo_tag::ActiveModel> = tags
            .iter()
            .map(|tag| todo_tag::ActiveModel {
                todo_id: Set(todo_id),
                tag_id: Set(tag.id),
                ..Default::default()
            })
            .collect();

        TodoTag::insert_many(relations).exec(db).await?;
        Ok(())
    }

    /// 入力に部分一致するタグ名を最大10件、名前順で返す。
    /// 空の検索文字列には空リストを返す。
    pub async fn suggest(
        db: &DatabaseConnection,
        search: Option<&str>,
    ) -> Result<Vec<String>, AppError> {
        let query = match search.and_then(Self::normalize) {
            Some(query) => query,
            None => return Ok(Vec::new()),
        };

        let tags = Tag::find()
            .filter(tag::Column::Name.contains(&query))
            .order_by_asc(tag::Column::Name)
            .limit(SUGGEST_LIMIT)
            .all(db)
            .await?;

        Ok(tags.into_iter().map(|tag| tag.name).collect())
    }
}
