//! 리포지토리 공통 기능
//!
//! 리포지토리는 `#[repository(name = .., collection = ..)]` 매크로가 만든
//! `collection::<T>()`로 컬렉션 핸들을 얻고, 목록 조회는 [`find_page`]로
//! 페이지와 전체 개수를 함께 가져옵니다.
//!
//! 컬렉션 인덱스는 각 리포지토리가 [`IndexRegistration`]으로 제출하고,
//! 시작 시 [`ensure_all_indexes`]가 한 번에 생성합니다.

use futures_util::{future::BoxFuture, TryStreamExt};
use mongodb::{
    bson::{Bson, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};
use serde::de::DeserializeOwned;
use crate::core::errors::{AppError, AppResult};

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY: i32 = 11000;

/// 리포지토리별 인덱스 생성 작업
pub struct IndexRegistration {
    pub repository: &'static str,
    pub ensure: fn() -> BoxFuture<'static, AppResult<()>>,
}

inventory::collect!(IndexRegistration);

/// 제출된 모든 인덱스를 생성합니다. 하나라도 실패하면 시작을 중단합니다.
pub async fn ensure_all_indexes() -> AppResult<()> {
    for registration in inventory::iter::<IndexRegistration>() {
        (registration.ensure)().await.map_err(|e| {
            log::error!("❌ {} 인덱스 생성 실패: {}", registration.repository, e);
            e
        })?;
        log::info!("  ✓ {} 인덱스", registration.repository);
    }
    Ok(())
}

/// 유니크 인덱스 위반 여부
pub fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// 중복 키는 `ConflictError`로, 나머지는 `DatabaseError`로 변환합니다.
pub fn map_write_error(error: mongodb::error::Error, conflict_message: &str) -> AppError {
    if is_duplicate_key(&error) {
        AppError::ConflictError(conflict_message.to_string())
    } else {
        AppError::from(error)
    }
}

pub fn index(keys: Document, name: &str, unique: bool) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(
            IndexOptions::builder()
                .unique(unique)
                .name(name.to_string())
                .build(),
        )
        .build()
}

/// 필터에 맞는 문서 한 페이지와 전체 개수
pub async fn find_page<T>(
    collection: &Collection<T>,
    filter: Document,
    sort: Document,
    skip: u64,
    limit: u64,
) -> AppResult<(Vec<T>, u64)>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let total = collection.count_documents(filter.clone()).await?;

    let items: Vec<T> = collection
        .find(filter)
        .sort(sort)
        .skip(skip)
        .limit(limit as i64)
        .await?
        .try_collect()
        .await?;

    Ok((items, total))
}

/// 집계 결과의 정수 필드 (`$sum`은 크기에 따라 i32 또는 i64)
pub fn read_count(document: &Document, key: &str) -> i64 {
    match document.get(key) {
        Some(Bson::Int32(value)) => i64::from(*value),
        Some(Bson::Int64(value)) => *value,
        Some(Bson::Double(value)) => *value as i64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_read_count_accepts_int_widths() {
        let document = doc! { "a": 3_i32, "b": 7_i64, "c": 2.0 };
        assert_eq!(read_count(&document, "a"), 3);
        assert_eq!(read_count(&document, "b"), 7);
        assert_eq!(read_count(&document, "c"), 2);
        assert_eq!(read_count(&document, "missing"), 0);
    }

    #[test]
    fn test_index_model_options() {
        let model = index(doc! { "email": 1 }, "email_unique", true);
        let options = model.options.unwrap();
        assert_eq!(options.unique, Some(true));
        assert_eq!(options.name.as_deref(), Some("email_unique"));
    }
}
