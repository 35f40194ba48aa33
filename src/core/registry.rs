//! # Service Registry
//!
//! `#[service]` / `#[repository]` 매크로(singleton_macro)와 `inventory` 기반의
//! 싱글톤 의존성 주입 컨테이너입니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[repository(name = "product", collection = "products")]
//!    │     → RepositoryRegistration 제출, instance()/collection() 생성
//!    └─ #[service(name = "product")]
//!          → ServiceRegistration 제출, instance() 생성
//!
//! 2. main()
//!    ├─ ServiceLocator::set(Arc<Database>)      ← 인프라 빈 수동 등록
//!    ├─ ServiceLocator::set(Arc<RedisClient>)
//!    ├─ ServiceLocator::set(Arc<TokenService>)
//!    └─ ServiceLocator::initialize_all()        ← 리포지토리 → 서비스 순서로 생성
//!
//! 3. 생성 시점
//!    └─ Arc<T> 필드마다 ServiceLocator::get::<T>() 로 주입
//! ```
//!
//! 아직 생성되지 않은 타입은 타입 이름(`ProductRepository` → `product`)으로
//! 등록 정보를 찾아 그 자리에서 만듭니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::core::errors::{AppError, AppResult};

/// `#[service]` 매크로가 자동 구현하는 trait
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[repository]` 매크로가 자동 구현하는 trait
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[service]` 매크로가 제출하는 등록 정보 (`name`은 `<이름>_service`)
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `#[repository]` 매크로가 제출하는 등록 정보 (`name`은 `<이름>_repository`)
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// `user_details_repository` → `userdetails`
fn registration_key(name: &str, suffix: &str) -> String {
    name.strip_suffix(suffix)
        .unwrap_or(name)
        .replace('_', "")
        .to_lowercase()
}

static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    inventory::iter::<ServiceRegistration>()
        .map(|registration| (registration_key(registration.name, "_service"), registration))
        .collect()
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    inventory::iter::<RepositoryRegistration>()
        .map(|registration| (registration_key(registration.name, "_repository"), registration))
        .collect()
});

pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 인스턴스를 조회하고, 없으면 등록 정보로 생성합니다.
    ///
    /// 매크로가 생성한 `new()`가 필드 주입에 사용합니다.
    ///
    /// # Panics
    ///
    /// 등록되지 않은 타입이거나 순환 의존성이 있으면 시작 단계에서 패닉합니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        match Self::try_get::<T>() {
            Ok(instance) => instance,
            Err(e) => panic!("{}", e),
        }
    }

    /// [`get`](Self::get)과 같지만 실패를 `AppError::InternalError`로 돌려줍니다.
    pub fn try_get<T: 'static + Send + Sync>() -> AppResult<Arc<T>> {
        let type_id = TypeId::of::<T>();
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());

        if let Some(instance) = Self::lookup::<T>()? {
            return Ok(instance);
        }

        {
            let mut initializing = LOCATOR
                .initializing
                .write()
                .map_err(|_| lock_error())?;
            if !initializing.insert(type_id) {
                return Err(AppError::InternalError(format!("순환 의존성 감지: {}", clean_name)));
            }
        }

        // 생성자는 다시 get()을 부르므로 잠금 없이 호출
        let created = Self::construct::<T>(&clean_name);

        LOCATOR
            .initializing
            .write()
            .map_err(|_| lock_error())?
            .remove(&type_id);

        let instance = created?;
        LOCATOR
            .instances
            .write()
            .map_err(|_| lock_error())?
            .insert(type_id, instance.clone() as Arc<dyn Any + Send + Sync>);

        Ok(instance)
    }

    fn lookup<T: 'static + Send + Sync>() -> AppResult<Option<Arc<T>>> {
        let instances = LOCATOR.instances.read().map_err(|_| lock_error())?;
        Ok(instances
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok()))
    }

    fn construct<T: 'static + Send + Sync>(clean_name: &str) -> AppResult<Arc<T>> {
        let constructor = if let Some(entity) = clean_name.strip_suffix("Repository") {
            REPOSITORY_NAME_CACHE
                .get(&entity.to_lowercase())
                .map(|registration| registration.constructor)
        } else if let Some(entity) = clean_name.strip_suffix("Service") {
            SERVICE_NAME_CACHE
                .get(&entity.to_lowercase())
                .map(|registration| registration.constructor)
        } else {
            None
        };

        let constructor = constructor.ok_or_else(|| {
            AppError::InternalError(format!(
                "등록되지 않은 컴포넌트입니다: {} (#[service]/#[repository] 또는 ServiceLocator::set 필요)",
                clean_name
            ))
        })?;

        constructor()
            .downcast::<Arc<T>>()
            .map(|instance| *instance)
            .map_err(|_| AppError::InternalError(format!("타입 불일치: {}", clean_name)))
    }

    /// 인프라 컴포넌트(Database, RedisClient, TokenService)를 직접 등록합니다.
    /// 같은 타입이 이미 있으면 교체합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());
        log::debug!("📦 Registering: {}", clean_name);

        match LOCATOR.instances.write() {
            Ok(mut instances) => {
                instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
            }
            Err(_) => log::error!("서비스 레지스트리 잠금 실패: {}", clean_name),
        }
    }

    /// 등록된 모든 리포지토리와 서비스를 생성합니다.
    pub async fn initialize_all() -> AppResult<()> {
        let repositories: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        log::info!("🔄 리포지토리 {}개 생성", repositories.len());
        for registration in &repositories {
            let _instance = (registration.constructor)();
            log::info!("  ✓ {}", registration.name);
        }

        let services: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        log::info!("🔄 서비스 {}개 생성", services.len());
        for registration in &services {
            let _instance = (registration.constructor)();
            log::info!("  ✓ {}", registration.name);
        }

        log::info!(
            "✅ 컴포넌트 초기화 완료 (리포지토리 {}, 서비스 {})",
            repositories.len(),
            services.len()
        );
        Ok(())
    }

    fn extract_clean_type_name(type_name: &str) -> String {
        match type_name.rfind("::") {
            Some(pos) => type_name[pos + 2..].to_string(),
            None => type_name.to_string(),
        }
    }
}

fn lock_error() -> AppError {
    AppError::InternalError("서비스 레지스트리 잠금 실패".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverRegistered;

    struct WidgetService {
        label: &'static str,
    }

    inventory::submit! {
        ServiceRegistration {
            name: "widget_service",
            constructor: || {
                let instance = Arc::new(WidgetService { label: "widget" });
                Box::new(instance) as Box<dyn Any + Send + Sync>
            },
        }
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        ServiceLocator::set(Arc::new(String::from("hello")));
        let value = ServiceLocator::get::<String>();
        assert_eq!(value.as_str(), "hello");
    }

    #[test]
    fn test_missing_type_is_an_error_from_try_get() {
        let result = ServiceLocator::try_get::<NeverRegistered>();
        assert!(matches!(result, Err(AppError::InternalError(msg)) if msg.contains("NeverRegistered")));
    }

    #[test]
    fn test_registered_service_is_constructed_once() {
        let first = ServiceLocator::try_get::<WidgetService>().unwrap();
        let second = ServiceLocator::get::<WidgetService>();

        assert_eq!(first.label, "widget");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_registration_key_normalisation() {
        assert_eq!(registration_key("user_details_repository", "_repository"), "userdetails");
        assert_eq!(registration_key("cart_service", "_service"), "cart");
        assert_eq!(registration_key("plain", "_service"), "plain");
    }

    #[test]
    fn test_extract_clean_type_name() {
        assert_eq!(
            ServiceLocator::extract_clean_type_name("storefront_backend::services::CartService"),
            "CartService"
        );
        assert_eq!(ServiceLocator::extract_clean_type_name("Plain"), "Plain");
    }
}
