//! Authentication and session management

pub mod events;
pub mod forms;
pub mod models;
pub mod session;
pub mod token;

pub use events::{EventBus, SessionEvent, Subscription};
pub use forms::{password_strength, DetailsForm, PasswordStrength, RegisterForm};
pub use models::{
    AuthResponse, LoginRequest, ProfileDetails, RegisterRequest, Session, User, UserUpdate,
};
pub use session::{SessionStore, TOKEN_KEY, USER_KEY};
