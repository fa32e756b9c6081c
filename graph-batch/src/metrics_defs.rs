//! Metrics definitions for graph batch requests.

use shared::metrics_defs::{MetricDef, MetricType};

pub const BATCH_REQUESTS: MetricDef = MetricDef {
    name: "batch.requests",
    metric_type: MetricType::Counter,
    description: "Number of batch requests sent. Tagged with query.",
};

pub const BATCH_FAILURES: MetricDef = MetricDef {
    name: "batch.failures",
    metric_type: MetricType::Counter,
    description: "Number of batch requests that failed as a whole. Tagged with reason.",
};

pub const BATCH_DURATION: MetricDef = MetricDef {
    name: "batch.duration",
    metric_type: MetricType::Histogram,
    description: "Time to send a batch request and read its response in seconds",
};

pub const SLOT_POPULATED: MetricDef = MetricDef {
    name: "reconcile.slot.populated",
    metric_type: MetricType::Counter,
    description: "Number of profile slots filled from a sub-response. Tagged with slot.",
};

pub const SLOT_FAILED: MetricDef = MetricDef {
    name: "reconcile.slot.failed",
    metric_type: MetricType::Counter,
    description: "Number of sub-responses skipped during reconciliation. Tagged with slot, reason.",
};

pub const ALL_METRICS: &[MetricDef] = &[
    BATCH_REQUESTS,
    BATCH_FAILURES,
    BATCH_DURATION,
    SLOT_POPULATED,
    SLOT_FAILED,
];
