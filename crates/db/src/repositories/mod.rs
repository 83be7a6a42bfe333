pub mod account_repo;
pub mod admin_log_repo;
pub mod ban_repo;
pub mod character_repo;
pub mod download_repo;
pub mod guild_repo;
pub mod news_repo;
pub mod ranking_repo;
pub mod session_repo;
pub mod setup_repo;
pub mod wcoin_repo;

pub use account_repo::AccountRepo;
pub use admin_log_repo::AdminLogRepo;
pub use ban_repo::BanRepo;
pub use character_repo::CharacterRepo;
pub use download_repo::DownloadRepo;
pub use guild_repo::GuildRepo;
pub use news_repo::NewsRepo;
pub use ranking_repo::RankingRepo;
pub use session_repo::SessionRepo;
pub use setup_repo::SetupRepo;
pub use wcoin_repo::WcoinRepo;
