//! Circuit breaker guarding calls to the user service
//!
//! Consecutive failures trip the breaker open. While open every call is
//! rejected without touching the network. Once the open duration has
//! elapsed a limited number of trial calls go through (half-open); enough
//! successes close the breaker, any failure opens it again.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    pub name: String,
    /// Consecutive failures that trip a closed breaker
    pub failure_threshold: u32,
    /// Consecutive half-open successes needed to close again
    pub success_threshold: u32,
    pub open_duration: Duration,
    pub max_half_open_requests: u32,
}

impl CircuitBreakerConfig {
    pub fn new(name: &str, failure_threshold: u32, open_duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            failure_threshold: failure_threshold.max(1),
            success_threshold: 1,
            open_duration,
            max_half_open_requests: 1,
        }
    }
}

struct BreakerState {
    config: CircuitBreakerConfig,
    state: CircuitState,
    consecutive_failures: u32,
    consecutive_successes: u32,
    half_open_requests: u32,
    last_opened: Option<Instant>,
}

impl BreakerState {
    fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            state: CircuitState::Closed,
            consecutive_failures: 0,
            consecutive_successes: 0,
            half_open_requests: 0,
            last_opened: None,
        }
    }

    fn is_request_allowed(&mut self) -> bool {
        match self.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let expired = self
                    .last_opened
                    .map(|opened_at| opened_at.elapsed() >= self.config.open_duration)
                    .unwrap_or(true);
                if expired {
                    self.transition_to_half_open();
                    self.half_open_requests += 1;
                }
                expired
            }
            CircuitState::HalfOpen => {
                if self.half_open_requests < self.config.max_half_open_requests {
                    self.half_open_requests += 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn record_success(&mut self) {
        self.consecutive_failures = 0;
        self.consecutive_successes += 1;

        if self.state == CircuitState::HalfOpen
            && self.consecutive_successes >= self.config.success_threshold
        {
            self.transition_to_closed();
        }
    }

    fn record_failure(&mut self) {
        self.consecutive_failures += 1;
        self.consecutive_successes = 0;

        match self.state {
            CircuitState::Closed
                if self.consecutive_failures >= self.config.failure_threshold =>
            {
                self.transition_to_open();
            }
            CircuitState::HalfOpen => self.transition_to_open(),
            _ => {}
        }
    }

    fn transition_to_open(&mut self) {
        tracing::warn!(
            breaker = %self.config.name,
            failures = self.consecutive_failures,
            "Circuit breaker opened"
        );
        self.state = CircuitState::Open;
        self.last_opened = Some(Instant::now());
        self.half_open_requests = 0;
    }

    fn transition_to_half_open(&mut self) {
        tracing::info!(breaker = %self.config.name, "Circuit breaker half-open");
        self.state = CircuitState::HalfOpen;
        self.consecutive_failures = 0;
        self.consecutive_successes = 0;
        self.half_open_requests = 0;
    }

    fn transition_to_closed(&mut self) {
        tracing::info!(breaker = %self.config.name, "Circuit breaker closed");
        self.state = CircuitState::Closed;
        self.consecutive_failures = 0;
        self.consecutive_successes = 0;
        self.half_open_requests = 0;
    }
}

/// Shared breaker; clones observe the same state
#[derive(Clone)]
pub struct CircuitBreaker {
    state: Arc<RwLock<BreakerState>>,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(BreakerState::new(config))),
        }
    }

    /// `false` means fail fast without calling the service
    pub async fn is_request_allowed(&self) -> bool {
        self.state.write().await.is_request_allowed()
    }

    pub async fn record_success(&self) {
        self.state.write().await.record_success();
    }

    pub async fn record_failure(&self) {
        self.state.write().await.record_failure();
    }

    pub async fn state(&self) -> CircuitState {
        self.state.read().await.state
    }

    pub async fn name(&self) -> String {
        self.state.read().await.config.name.clone()
    }

    #[cfg(test)]
    pub async fn trip(&self) {
        self.state.write().await.transition_to_open();
    }
}
