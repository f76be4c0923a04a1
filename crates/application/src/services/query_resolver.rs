use crate::ports::UpstreamForwarder;
use crate::services::RecordStore;
use dnsd_domain::config::dns::DEFAULT_MAX_CNAME_HOPS;
use dnsd_domain::DomainError;
use futures::future::BoxFuture;
use hickory_proto::op::Query;
use hickory_proto::rr::{RData, Record, RecordType};
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, warn};

/// Answers produced for a single question.
#[derive(Debug, Clone, Default)]
pub struct DnsResolution {
    pub answers: Vec<Record>,

    /// At least one answer came from the upstream forwarder.
    pub forwarded: bool,

    /// CNAME chasing hit the hop cap; `answers` holds what was collected
    /// before the chase was abandoned.
    pub chain_too_deep: bool,
}

impl DnsResolution {
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

pub struct QueryResolver {
    store: Arc<RecordStore>,
    forwarder: Option<Arc<dyn UpstreamForwarder>>,
    max_cname_hops: usize,
}

impl QueryResolver {
    pub fn new(store: Arc<RecordStore>, forwarder: Option<Arc<dyn UpstreamForwarder>>) -> Self {
        Self {
            store,
            forwarder,
            max_cname_hops: DEFAULT_MAX_CNAME_HOPS,
        }
    }

    pub fn with_max_cname_hops(mut self, max_cname_hops: usize) -> Self {
        self.max_cname_hops = max_cname_hops;
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn has_forwarder(&self) -> bool {
        self.forwarder.is_some()
    }

    /// Resolve one question against the local records, chasing CNAMEs and
    /// falling back to the upstream forwarder when nothing matches.
    ///
    /// Answer order: each CNAME owned by the question name followed by the
    /// answers for its target, then records matching (name, type, class)
    /// exactly, then forwarded answers when no local answer exists.
    pub async fn resolve(&self, question: &Query) -> DnsResolution {
        let mut resolution = DnsResolution::default();

        if let Err(e) = self
            .resolve_level(question.clone(), 0, &mut resolution)
            .await
        {
            warn!(
                domain = %question.name(),
                record_type = ?question.query_type(),
                answers = resolution.answers.len(),
                error = %e,
                "CNAME chase aborted"
            );
            resolution.chain_too_deep = true;
        }

        resolution
    }

    fn resolve_level<'a>(
        &'a self,
        question: Query,
        depth: usize,
        out: &'a mut DnsResolution,
    ) -> BoxFuture<'a, Result<(), DomainError>> {
        Box::pin(async move {
            let level_start = out.answers.len();
            let (cnames, exact) = self.local_matches(&question);

            for cname in cnames {
                out.answers.push(cname.clone());

                let RData::CNAME(target) = cname.data() else {
                    continue;
                };

                if depth >= self.max_cname_hops {
                    return Err(DomainError::ChainTooDeep {
                        name: question.name().to_string(),
                        max_hops: self.max_cname_hops,
                    });
                }

                debug!(
                    domain = %question.name(),
                    target = %target.0,
                    depth = depth + 1,
                    "Chasing CNAME"
                );

                let mut follow_up = Query::query(target.0.clone(), question.query_type());
                follow_up.set_query_class(question.query_class());
                self.resolve_level(follow_up, depth + 1, &mut *out).await?;
            }

            out.answers.extend(exact.into_iter().cloned());

            if out.answers.len() == level_start {
                if let Some(forwarder) = &self.forwarder {
                    let answers = forwarder.forward(&question).await;
                    debug!(
                        domain = %question.name(),
                        record_type = ?question.query_type(),
                        upstream = %forwarder.upstream(),
                        answers = answers.len(),
                        "Forwarded query"
                    );
                    out.forwarded |= !answers.is_empty();
                    out.answers.extend(answers);
                }
            }

            Ok(())
        })
    }

    /// Split the records owned by the question name into the CNAME group and
    /// the exact (name, type, class) group. A CNAME record only ever lands in
    /// the CNAME group, so a CNAME question does not see it twice.
    fn local_matches<'a>(
        &'a self,
        question: &Query,
    ) -> (SmallVec<[&'a Record; 1]>, SmallVec<[&'a Record; 4]>) {
        let mut cnames = SmallVec::new();
        let mut exact = SmallVec::new();

        for record in self.store.records_named(question.name()) {
            if record.record_type() == RecordType::CNAME {
                cnames.push(record);
            } else if record.record_type() == question.query_type()
                && record.dns_class() == question.query_class()
            {
                exact.push(record);
            }
        }

        (cnames, exact)
    }
}
