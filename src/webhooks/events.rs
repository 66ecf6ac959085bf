//! Buildkite webhook event types.
//!
//! This module defines typed representations of the webhook events Buildkite
//! delivers. Each event-type string maps to exactly one variant of
//! [`WebhookEvent`]; the variants share four payload shapes:
//!
//! - `agent.*` events carry an [`AgentEvent`]
//! - `build.*` events carry a [`BuildEvent`]
//! - `job.*` events carry a [`JobEvent`]
//! - `ping` carries a [`PingEvent`]
//!
//! Payload fields are all optional: Buildkite includes partial views of its
//! API resources and the decoder performs no defaulting or validation.

use serde::{Deserialize, Serialize};

use crate::types::{Agent, Build, Job, Organization, Pipeline, Service, User};

/// A parsed Buildkite webhook event.
///
/// The set of variants is closed: the parser rejects event-type strings that
/// are not listed here rather than silently ignoring them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookEvent {
    /// An agent connected to Buildkite.
    AgentConnected(AgentEvent),
    /// An agent disconnected cleanly.
    AgentDisconnected(AgentEvent),
    /// An agent stopped responding and was marked lost.
    AgentLost(AgentEvent),
    /// An agent stopped.
    AgentStopped(AgentEvent),
    /// An agent was asked to stop and is draining.
    AgentStopping(AgentEvent),
    /// A build has a failing job but has not finished yet.
    BuildFailing(BuildEvent),
    /// A build finished.
    BuildFinished(BuildEvent),
    /// A build started running.
    BuildRunning(BuildEvent),
    /// A build was scheduled.
    BuildScheduled(BuildEvent),
    /// A blocked job was unblocked and activated.
    JobActivated(JobEvent),
    /// A job finished.
    JobFinished(JobEvent),
    /// A job was scheduled.
    JobScheduled(JobEvent),
    /// A job started running on an agent.
    JobStarted(JobEvent),
    /// A test notification sent when a webhook service is set up.
    Ping(PingEvent),
}

impl WebhookEvent {
    /// Returns the `X-Buildkite-Event` string this variant corresponds to.
    pub fn event_type(&self) -> &'static str {
        match self {
            WebhookEvent::AgentConnected(_) => "agent.connected",
            WebhookEvent::AgentDisconnected(_) => "agent.disconnected",
            WebhookEvent::AgentLost(_) => "agent.lost",
            WebhookEvent::AgentStopped(_) => "agent.stopped",
            WebhookEvent::AgentStopping(_) => "agent.stopping",
            WebhookEvent::BuildFailing(_) => "build.failing",
            WebhookEvent::BuildFinished(_) => "build.finished",
            WebhookEvent::BuildRunning(_) => "build.running",
            WebhookEvent::BuildScheduled(_) => "build.scheduled",
            WebhookEvent::JobActivated(_) => "job.activated",
            WebhookEvent::JobFinished(_) => "job.finished",
            WebhookEvent::JobScheduled(_) => "job.scheduled",
            WebhookEvent::JobStarted(_) => "job.started",
            WebhookEvent::Ping(_) => "ping",
        }
    }

    /// Returns the user who triggered the event, when one is attached.
    pub fn sender(&self) -> Option<&User> {
        match self {
            WebhookEvent::AgentConnected(e)
            | WebhookEvent::AgentDisconnected(e)
            | WebhookEvent::AgentLost(e)
            | WebhookEvent::AgentStopped(e)
            | WebhookEvent::AgentStopping(e) => e.sender.as_ref(),
            WebhookEvent::BuildFailing(e)
            | WebhookEvent::BuildFinished(e)
            | WebhookEvent::BuildRunning(e)
            | WebhookEvent::BuildScheduled(e) => e.sender.as_ref(),
            WebhookEvent::JobActivated(e)
            | WebhookEvent::JobFinished(e)
            | WebhookEvent::JobScheduled(e)
            | WebhookEvent::JobStarted(e) => e.sender.as_ref(),
            WebhookEvent::Ping(e) => e.sender.as_ref(),
        }
    }
}

/// Payload of the `agent.*` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEvent {
    /// The event-type string, repeated inside the payload.
    pub event: Option<String>,
    pub agent: Option<Agent>,
    pub sender: Option<User>,
}

/// Payload of the `build.*` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEvent {
    /// The event-type string, repeated inside the payload.
    pub event: Option<String>,
    pub build: Option<Build>,
    pub pipeline: Option<Pipeline>,
    pub sender: Option<User>,
}

/// Payload of the `job.*` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEvent {
    /// The event-type string, repeated inside the payload.
    pub event: Option<String>,
    pub build: Option<Build>,
    pub job: Option<Job>,
    pub pipeline: Option<Pipeline>,
    pub sender: Option<User>,
}

/// Payload of the `ping` event, sent when a webhook service is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingEvent {
    /// The event-type string, always `"ping"`.
    pub event: Option<String>,
    pub service: Option<Service>,
    pub organization: Option<Organization>,
    pub sender: Option<User>,
}
