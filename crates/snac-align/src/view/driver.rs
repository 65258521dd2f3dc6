//! Executes view effects against a host backend.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use super::{AlignmentView, Effect, Message};
use crate::backend::HostBackend;

/// Runs one effect and returns the message carrying its result.
///
/// [`Effect::Focus`] has no result.
pub async fn run_effect<B: HostBackend>(backend: &B, effect: Effect) -> Option<Message> {
    match effect {
        Effect::LoadModel => Some(Message::ModelLoaded(
            backend.get_model().await.map(Arc::new),
        )),
        Effect::RequestPreview {
            ticket,
            mapping,
            engine,
        } => {
            let result = backend.preview_schema(&mapping, &engine).await;
            Some(Message::PreviewReady { ticket, result })
        }
        Effect::Save(mapping) => Some(Message::Saved(backend.save_schema(&mapping).await)),
        Effect::Focus => None,
    }
}

/// Feeds `message` to the view and runs the resulting effects to completion.
///
/// Effects run one after another; follow-up messages are processed in order
/// until the view has nothing left to do.
pub async fn dispatch<B: HostBackend>(view: &mut AlignmentView, backend: &B, message: Message) {
    let mut queue = VecDeque::from([message]);
    while let Some(message) = queue.pop_front() {
        for effect in view.update(message) {
            debug!(?effect, "running effect");
            if let Some(next) = run_effect(backend, effect).await {
                queue.push_back(next);
            }
        }
    }
}
