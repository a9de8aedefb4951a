use std::{str::FromStr, sync::Once};

use tracing::{dispatcher::set_global_default, level_filters::LevelFilter, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

/// 여러 레이어들을 하나의 `tracing` subscriber로 구성한다.
///
/// # 구현 노트
///
/// `impl Subscriber`를 반환 타입으로 사용해서 반환된 subscriber의 실제 타입을 숨긴다.
/// 반환된 subscriber를 `init_tracing_subscriber`로 넘기려면 `Send`이고 `Sync`여야 한다.
pub fn get_tracing_subscriber<Sink>(
    name: &str,
    default_level: LevelFilter,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    // RUST_LOG 환경 변수가 설정되어 있지 않으면 `default_level` 이상의 span을 출력한다.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::from_str("tower_http=debug,axum::rejection=trace")
            .unwrap_or_default()
            .add_directive(default_level.into())
    });

    let formatting_layer = BunyanFormattingLayer::new(name.into(), sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// subscriber를 글로벌 기본값으로 등록해서 span 데이터를 처리한다.
/// 한차례만 실행된다.
pub fn init_tracing_subscriber(tracing_subscriber: impl Subscriber + Send + Sync + 'static) {
    static ONCE: Once = Once::new();

    ONCE.call_once(|| {
        set_global_default(tracing_subscriber.into()).expect("Failed to set subscriber.");
        // `log` 크레이트로 남긴 기록(reqwest, hyper 등)도 `tracing`으로 모은다.
        LogTracer::builder().init().expect("Failed to set logger.");
    })
}
