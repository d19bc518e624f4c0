pub mod clock;
pub mod config;
mod error;
pub mod id;
pub mod key;
pub mod lock;
pub mod model;
pub mod repository;
pub mod service;
pub mod store;
pub mod tenant;
pub mod track;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, ConfigError, TrackConfig};
pub use error::{Error, Result};
pub use id::{IdGenerator, SequentialIds, UuidGenerator};
pub use lock::{InMemoryLockManager, LockManager, LockScope};
pub use model::{Action, Counter, Project};
pub use repository::{ActionRepository, CounterRepository, ProjectRepository, RepositoryContext};
pub use service::Analytics;
pub use store::{Codec, InMemoryKvStore, KvStore, RecordStore, StoreError};
pub use tenant::{Session, Tenant, DEFAULT_TENANT, TENANT_VARIABLE};
pub use track::{TrackStats, TrackWorker};
