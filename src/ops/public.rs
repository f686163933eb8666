//! Descriptors for the public (unauthenticated) market-data operations.

use super::{Field, Host, HttpMethod, OperationDescriptor, Rule};
use crate::shared::CandleType;

/// GET /{pair}/ticker
pub static TICKER: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Get,
    path: "/:pair/ticker",
    host: Host::Public,
    private: false,
    fields: &[Field {
        name: ":pair",
        rule: Rule::Str,
    }],
    required: &[":pair"],
    defaults: &[],
};

/// GET /{pair}/depth
pub static DEPTH: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Get,
    path: "/:pair/depth",
    host: Host::Public,
    private: false,
    fields: &[Field {
        name: ":pair",
        rule: Rule::Str,
    }],
    required: &[":pair"],
    defaults: &[],
};

/// GET /{pair}/transactions
pub static TRANSACTIONS: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Get,
    path: "/:pair/transactions",
    host: Host::Public,
    private: false,
    fields: &[Field {
        name: ":pair",
        rule: Rule::Str,
    }],
    required: &[":pair"],
    defaults: &[],
};

/// GET /{pair}/transactions/{yyyymmdd}
pub static TRANSACTIONS_YMD: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Get,
    path: "/:pair/transactions/:yyyymmdd",
    host: Host::Public,
    private: false,
    fields: &[
        Field {
            name: ":pair",
            rule: Rule::Str,
        },
        Field {
            name: ":yyyymmdd",
            rule: Rule::Digits(&[6]),
        },
    ],
    required: &[":pair"],
    defaults: &[],
};

/// GET /{pair}/candlestick/{candle-type}/{yyyy}
pub static CANDLESTICK: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Get,
    path: "/:pair/transactions/:candle_type/:yyyy",
    host: Host::Public,
    private: false,
    fields: &[
        Field {
            name: ":pair",
            rule: Rule::Str,
        },
        Field {
            name: ":candle_type",
            rule: Rule::Enum(CandleType::NAMES),
        },
        Field {
            name: ":yyyy",
            rule: Rule::Digits(&[4, 6]),
        },
    ],
    required: &[":pair", ":candle_type", ":yyyy"],
    defaults: &[],
};
