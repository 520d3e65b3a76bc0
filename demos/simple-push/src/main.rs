use argparse::{ArgumentParser, List, Store, StoreOption, StoreTrue};
use jpush_api::*;

fn main() {
    let mut app_key = String::new();
    let mut master_secret = String::new();
    let mut alert: Option<String> = None;
    let mut message: Option<String> = None;
    let mut platforms: Vec<String> = Vec::new();
    let mut tags: Vec<String> = Vec::new();
    let mut ttl: Option<i64> = None;
    let mut production = false;

    {
        let mut ap = ArgumentParser::new();
        ap.set_description("A JPush sender");

        ap.refer(&mut app_key)
            .add_option(&["-k", "--app_key"], Store, "JPush application key")
            .required();

        ap.refer(&mut master_secret)
            .add_option(&["-s", "--master_secret"], Store, "JPush master secret")
            .required();

        ap.refer(&mut alert)
            .add_option(&["-a", "--alert"], StoreOption, "Notification alert text");

        ap.refer(&mut message)
            .add_option(&["-m", "--message"], StoreOption, "Custom message content");

        ap.refer(&mut platforms)
            .add_option(&["-p", "--platform"], List, "Target platforms, all if not given");

        ap.refer(&mut tags)
            .add_option(&["--tag"], List, "Target tags, every device if not given");

        ap.refer(&mut ttl)
            .add_option(&["-t", "--time_to_live"], StoreOption, "Seconds to keep offline messages");

        ap.refer(&mut production)
            .add_option(&["--production"], StoreTrue, "Use the APNs production environment");

        ap.parse_args_or_exit();
    }

    let mut platform = Platform::new();
    if platforms.is_empty() {
        platform.set_all();
    } else if let Err(error) = platform.set(platforms) {
        println!("ERROR in platforms: {}", error);
        return;
    }

    let mut audience = Audience::new();
    if tags.is_empty() {
        audience.set_all();
    } else {
        audience.set_tag(tags);
    }

    let mut payload = Payload::new(platform, audience);

    if let Some(alert) = alert {
        payload.set_notification(Notification::new(alert));
    }

    if let Some(content) = message {
        payload.set_message(Message::new(content));
    }

    payload.set_options(Options {
        time_to_live: ttl.unwrap_or_default(),
        apns_production: production,
        ..Options::new()
    });

    if let Err(error) = payload.validate() {
        println!("ERROR in building payload: {}", error);
        return;
    }

    let mut client = match JPushClient::new(app_key, master_secret) {
        Ok(client) => client,
        Err(error) => {
            println!("ERROR in creating client: {}", error);
            return;
        }
    };

    println!("Payload: {}", serde_json::to_string(&payload).unwrap());
    client.set_payload(payload);

    match client.push_result() {
        Ok(result) => println!("Sent: {:?}", result.outcome()),
        Err(error) => println!("Error: {}", error),
    }
}
