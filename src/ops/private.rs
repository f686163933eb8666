//! Descriptors for the private (signed) account and trading operations.

use super::{Field, Host, HttpMethod, OperationDescriptor, Rule};

const SIDES: &[&str] = &["buy", "sell"];
const TYPES: &[&str] = &["limit", "market"];
const ORDERS: &[&str] = &["asc", "desc"];

/// GET /v1/user/assets
pub static GET_ASSETS: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Get,
    path: "/v1/user/assets",
    host: Host::Private,
    private: true,
    fields: &[],
    required: &[],
    defaults: &[],
};

/// GET /v1/user/spot/order
pub static GET_ORDER: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Get,
    path: "/v1/user/spot/order",
    host: Host::Private,
    private: true,
    fields: &[
        Field {
            name: "pair",
            rule: Rule::Str,
        },
        Field {
            name: "order_id",
            rule: Rule::Int,
        },
    ],
    required: &["pair", "order_id"],
    defaults: &[],
};

/// POST /v1/user/spot/order
pub static POST_ORDER: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Post,
    path: "/v1/user/spot/order",
    host: Host::Private,
    private: true,
    fields: &[
        Field {
            name: "pair",
            rule: Rule::Str,
        },
        Field {
            name: "amount",
            rule: Rule::Num,
        },
        Field {
            name: "price",
            rule: Rule::Num,
        },
        Field {
            name: "side",
            rule: Rule::Enum(SIDES),
        },
        Field {
            name: "type",
            rule: Rule::Enum(TYPES),
        },
    ],
    required: &["pair", "amount", "side", "type"],
    defaults: &[("type", "limit")],
};

/// POST /v1/user/spot/cancel_order
pub static CANCEL_ORDER: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Post,
    path: "/v1/user/spot/cancel_order",
    host: Host::Private,
    private: true,
    fields: &[
        Field {
            name: "pair",
            rule: Rule::Str,
        },
        Field {
            name: "order_id",
            rule: Rule::Int,
        },
    ],
    required: &["pair", "order_id"],
    defaults: &[],
};

/// POST /v1/user/spot/cancel_orders
pub static CANCEL_ORDERS: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Post,
    path: "/v1/user/spot/cancel_orders",
    host: Host::Private,
    private: true,
    fields: &[
        Field {
            name: "pair",
            rule: Rule::Str,
        },
        Field {
            name: "order_ids",
            rule: Rule::IntArray,
        },
    ],
    required: &["pair", "order_ids"],
    defaults: &[],
};

/// POST /v1/user/spot/orders_info
pub static ORDERS_INFO: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Post,
    path: "/v1/user/spot/orders_info",
    host: Host::Private,
    private: true,
    fields: &[
        Field {
            name: "pair",
            rule: Rule::Str,
        },
        Field {
            name: "order_ids",
            rule: Rule::IntArray,
        },
    ],
    required: &["pair", "order_ids"],
    defaults: &[],
};

/// GET /v1/user/spot/active_orders
pub static ACTIVE_ORDERS: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Get,
    path: "/v1/user/spot/active_orders",
    host: Host::Private,
    private: true,
    fields: &[
        Field {
            name: "pair",
            rule: Rule::Str,
        },
        Field {
            name: "count",
            rule: Rule::Int,
        },
        Field {
            name: "from_id",
            rule: Rule::Int,
        },
        Field {
            name: "end_id",
            rule: Rule::Int,
        },
        Field {
            name: "since",
            rule: Rule::Int,
        },
        Field {
            name: "end",
            rule: Rule::Int,
        },
    ],
    required: &["pair"],
    defaults: &[],
};

/// GET /v1/user/spot/trade_history
pub static TRADE_HISTORY: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Get,
    path: "/v1/user/spot/trade_history",
    host: Host::Private,
    private: true,
    fields: &[
        Field {
            name: "pair",
            rule: Rule::Str,
        },
        Field {
            name: "count",
            rule: Rule::Int,
        },
        Field {
            name: "order_id",
            rule: Rule::Int,
        },
        Field {
            name: "since",
            rule: Rule::Int,
        },
        Field {
            name: "end",
            rule: Rule::Int,
        },
        Field {
            name: "order",
            rule: Rule::Enum(ORDERS),
        },
    ],
    required: &["pair"],
    defaults: &[],
};

/// GET /v1/user/withdrawal_account
pub static WITHDRAWAL_ACCOUNT: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Get,
    path: "/v1/user/withdrawal_account",
    host: Host::Private,
    private: true,
    fields: &[Field {
        name: "asset",
        rule: Rule::Str,
    }],
    required: &["asset"],
    defaults: &[],
};

/// POST /v1/user/request_withdrawal
pub static REQUEST_WITHDRAWAL: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Post,
    path: "/v1/user/request_withdrawal",
    host: Host::Private,
    private: true,
    fields: &[
        Field {
            name: "asset",
            rule: Rule::Str,
        },
        Field {
            name: "uuid",
            rule: Rule::Str,
        },
        Field {
            name: "amount",
            rule: Rule::Str,
        },
        Field {
            name: "otp_token",
            rule: Rule::Str,
        },
        Field {
            name: "sms_token",
            rule: Rule::Str,
        },
    ],
    required: &["asset", "uuid", "amount"],
    defaults: &[],
};

/// GET /v1/spot/status — served by the private host but callable without a
/// credential.
pub static SPOT_STATUS: OperationDescriptor = OperationDescriptor {
    method: HttpMethod::Get,
    path: "/v1/spot/status",
    host: Host::Private,
    private: false,
    fields: &[],
    required: &[],
    defaults: &[],
};
