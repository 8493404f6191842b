//! SeaORM repository implementations

pub mod comment_repository;
pub mod item_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod user_repository;

pub use comment_repository::SeaOrmCommentRepository;
pub use item_repository::SeaOrmItemRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;
pub use user_repository::SeaOrmUserRepository;
