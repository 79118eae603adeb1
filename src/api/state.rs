//! Application state for shared repositories and the usage recorder

use std::sync::Arc;

use crate::domain::booking::BookingRepository;
use crate::domain::catalog::{ContentRepository, CourseRepository, ProductRepository};
use crate::domain::identity::IdentityRepository;
use crate::domain::quote::QuoteRepository;
use crate::domain::submission::{ApplicationRepository, NewsletterRepository, SubmissionThrottle};
use crate::infrastructure::usage::UsageRecorder;

/// Application state shared by every handler, using dynamic dispatch so
/// tests can swap in the in-memory backends.
#[derive(Clone)]
pub struct AppState {
    pub identities: Arc<dyn IdentityRepository>,
    pub usage: UsageRecorder,
    pub content: Arc<dyn ContentRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub quotes: Arc<dyn QuoteRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub newsletter: Arc<dyn NewsletterRepository>,
    pub throttle: Arc<dyn SubmissionThrottle>,
}
