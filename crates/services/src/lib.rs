//! # services
//!
//! Use cases of the blog platform. Each service owns the ports it needs as
//! trait objects, so any adapter (or a mock) can stand behind them.
//!
//! Every operation that acts on behalf of someone takes the resolved caller
//! [`Account`](domains::Account); authorization happens here, through
//! `domains::policy`, before any mutation reaches a repository.

pub mod admin;
pub mod auth;
pub mod comments;
pub mod identity;
pub mod moderation;
pub mod posts;
pub mod roles;
pub mod validation;

use std::sync::Arc;

use domains::{
    AccountRepository, CommentRepository, FlagRepository, LikeRepository, PasswordHasher,
    PostRepository, RoleRepository, StatsRepository, TokenService,
};

pub use admin::AdminService;
pub use auth::{AuthService, Registration, Session};
pub use comments::CommentService;
pub use identity::IdentityResolver;
pub use moderation::ModerationService;
pub use posts::PostService;
pub use roles::RoleService;

/// Every outbound port, bundled for wiring.
#[derive(Clone)]
pub struct Ports {
    pub accounts: Arc<dyn AccountRepository>,
    pub roles: Arc<dyn RoleRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub flags: Arc<dyn FlagRepository>,
    pub stats: Arc<dyn StatsRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
}

/// All use cases over one set of ports.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub identity: IdentityResolver,
    pub posts: PostService,
    pub comments: CommentService,
    pub moderation: ModerationService,
    pub roles: RoleService,
    pub admin: AdminService,
}

impl Services {
    pub fn new(ports: Ports) -> Self {
        Self {
            auth: AuthService::new(ports.accounts.clone(), ports.hasher.clone(), ports.tokens.clone()),
            identity: IdentityResolver::new(ports.accounts.clone(), ports.tokens.clone()),
            posts: PostService::new(ports.posts.clone(), ports.likes.clone()),
            comments: CommentService::new(ports.posts.clone(), ports.comments.clone(), ports.likes.clone()),
            moderation: ModerationService::new(ports.posts.clone(), ports.comments.clone(), ports.flags.clone()),
            roles: RoleService::new(ports.roles.clone(), ports.accounts.clone()),
            admin: AdminService::new(ports.stats, ports.accounts),
        }
    }
}
