use crate::services::QueryResolver;
use hickory_proto::op::{Message, MessageType};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Builds the reply for one inbound request message.
pub struct HandleDnsQueryUseCase {
    resolver: Arc<QueryResolver>,
}

impl HandleDnsQueryUseCase {
    pub fn new(resolver: Arc<QueryResolver>) -> Self {
        Self { resolver }
    }

    /// The reply copies the request ID, opcode, RD flag and question
    /// section, is marked authoritative, and carries the answers of every
    /// question in question order. Per-question failures only ever shrink
    /// the answer section.
    pub async fn execute(&self, request: &Message, client_ip: IpAddr) -> Message {
        let start = Instant::now();

        let mut reply = Message::new();
        reply
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_authoritative(true)
            .set_recursion_desired(request.recursion_desired());
        reply.add_queries(request.queries().iter().cloned());

        for question in request.queries() {
            info!(
                domain = %question.name(),
                record_type = ?question.query_type(),
                client = %client_ip,
                "DNS query received"
            );

            let resolution = self.resolver.resolve(question).await;

            debug!(
                domain = %question.name(),
                answers = resolution.answers.len(),
                forwarded = resolution.forwarded,
                chain_too_deep = resolution.chain_too_deep,
                "Question resolved"
            );

            reply.add_answers(resolution.answers);
        }

        debug!(
            id = request.id(),
            questions = request.queries().len(),
            answers = reply.answers().len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Reply composed"
        );

        reply
    }
}
