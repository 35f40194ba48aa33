//! `orders` 컬렉션
//!
//! 상태 전이는 `created` → `paid` | `failed` 한 번뿐이며,
//! 필터에 `status: created`를 넣어 중복 검증 요청이 두 번 반영되지 않게 합니다.

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, DateTime}, options::ReturnDocument};
use futures_util::{FutureExt, TryStreamExt};
use singleton_macro::repository;
use crate::{
    core::errors::AppResult,
    db::Database,
    domain::entities::shopping::order::{Order, OrderStatus},
    repositories::base::{index, map_write_error, IndexRegistration},
};

#[repository(name = "order", collection = "orders")]
pub struct OrderRepository {
    db: Arc<Database>,
}

impl OrderRepository {
    pub async fn create(&self, mut order: Order) -> AppResult<Order> {
        let result = self
            .collection::<Order>()
            .insert_one(&order)
            .await
            .map_err(|e| map_write_error(e, "이미 등록된 결제 주문입니다"))?;

        order.id = result.inserted_id.as_object_id();
        Ok(order)
    }

    pub async fn find_by_gateway_order_id(&self, gateway_order_id: &str) -> AppResult<Option<Order>> {
        Ok(self
            .collection::<Order>()
            .find_one(doc! { "gateway_order_id": gateway_order_id })
            .await?)
    }

    pub async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Order>> {
        let orders = self
            .collection::<Order>()
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(orders)
    }

    /// `created` 상태인 주문만 `paid`로 바꿉니다. 이미 정산된 주문이면 `None`.
    pub async fn mark_paid(&self, gateway_order_id: &str, payment_id: &str) -> AppResult<Option<Order>> {
        let now = DateTime::now();

        Ok(self
            .collection::<Order>()
            .find_one_and_update(
                doc! { "gateway_order_id": gateway_order_id, "status": OrderStatus::Created.as_str() },
                doc! { "$set": {
                    "status": OrderStatus::Paid.as_str(),
                    "gateway_payment_id": payment_id,
                    "paid_at": now,
                    "updated_at": now,
                } },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    pub async fn mark_failed(&self, gateway_order_id: &str, payment_id: &str, reason: &str) -> AppResult<Option<Order>> {
        Ok(self
            .collection::<Order>()
            .find_one_and_update(
                doc! { "gateway_order_id": gateway_order_id, "status": OrderStatus::Created.as_str() },
                doc! { "$set": {
                    "status": OrderStatus::Failed.as_str(),
                    "gateway_payment_id": payment_id,
                    "failure_reason": reason,
                    "updated_at": DateTime::now(),
                } },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        self.collection::<Order>()
            .create_indexes([
                index(doc! { "gateway_order_id": 1 }, "gateway_order_id_unique", true),
                index(doc! { "user_id": 1, "created_at": -1 }, "user_orders", false),
            ])
            .await?;
        Ok(())
    }
}

inventory::submit! {
    IndexRegistration {
        repository: "order_repository",
        ensure: || async { OrderRepository::instance().create_indexes().await }.boxed(),
    }
}
