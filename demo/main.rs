use http_signature::{
    Context, Error, RemoteError, Runtime,
    bridge::{Function, Invocation, from_fn},
};

fn main() {
    env_logger::init();

    let mut runtime = Runtime::with_handler(from_fn(handle));
    let req = runtime.context_mut().request_mut();
    req.set_method("GET").set_uri("/hello").set_body("ping");
    req.headers_mut().set("Accept", ["text/plain"]);

    let mut module = Function::new(guest);

    match runtime.run(&mut module) {
        Ok(()) => {
            let res = runtime.context().response();
            log::info!("{} {:?}", res.status_code(), res.body());
            for (name, values) in res.headers() {
                log::info!("{name}: {}", values.join(", "));
            }
        }
        Err(err) => log::error!("invocation failed ({:?}): {err}", err.kind()),
    }
}

// ===== Guest =====

fn guest(inv: &mut Invocation<'_>) -> Result<(), Error> {
    let req = inv.context().request();
    log::info!("> {} {} ({} bytes)", req.method(), req.uri(), req.content_length());

    let ctx = inv.next()?;
    ctx.response_mut().headers_mut().set("X-Guest", ["demo"]);
    Ok(())
}

// ===== Host =====

fn handle(ctx: &mut Context) -> Result<(), Error> {
    if ctx.request().uri() != "/hello" {
        return Err(RemoteError::new("not found").into());
    }
    let body = format!("Hello, {}!", String::from_utf8_lossy(ctx.request().body()));
    ctx.response_mut()
        .set_status_code(200)
        .set_body(body)
        .headers_mut()
        .set("Content-Type", ["text/plain"]);
    Ok(())
}
