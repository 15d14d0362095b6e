//! Control channel command definitions.
//!
//! The Shell owns the WebSocket; the Core asks it to connect and to send
//! frames. Inbound frames are not responses to a `Send` and reach the Core as
//! `ChannelEvent::MessageReceived`.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

// Operations that the Shell needs to perform on the control channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChannelOperation {
    Connect { url: String },
    Send { message: String },
}

// What the Shell reports back for an operation. Inbound frames and a closed
// socket are not operation results; the Shell sends them as `ChannelEvent`s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChannelOutput {
    Connected,
    Sent,
    Error { message: String },
}

impl Operation for ChannelOperation {
    type Output = ChannelOutput;
}

/// Command-based control channel API
pub struct Channel<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Channel<Effect, Event>
where
    Effect: Send + From<crux_core::Request<ChannelOperation>> + 'static,
    Event: Send + 'static,
{
    /// Open the connection to the device
    pub fn connect(url: impl Into<String>) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(ChannelOperation::Connect { url: url.into() })
    }

    /// Transmit an encoded request frame
    pub fn send(message: impl Into<String>) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(ChannelOperation::Send {
            message: message.into(),
        })
    }
}

/// Request builder for control channel operations
#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: ChannelOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<ChannelOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: ChannelOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    /// Build the request into a Command RequestBuilder
    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = ChannelOutput>>
    {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}
