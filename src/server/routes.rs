use crate::data::store::state_path;
use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

fn ok_json(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

pub fn route_request(method: &str, path: &str, body: &str) -> HttpResponse {
    let state = state_path();
    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/units") => match api::units_payload(&state) {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/units") => match api::unit_post_payload(&state, body) {
            Ok(payload) => ok_json(payload),
            Err(err) => unit_error_response(err),
        },
        (method, path) if path.starts_with("/api/units/") => {
            let id = path
                .trim_start_matches("/api/units/")
                .split('/')
                .next()
                .unwrap_or("");
            match method {
                "GET" => match api::unit_get_payload(&state, id) {
                    Ok(payload) => ok_json(payload),
                    Err(err) => unit_error_response(err),
                },
                "PUT" => match api::unit_put_payload(&state, id, body) {
                    Ok(payload) => ok_json(payload),
                    Err(err) => unit_error_response(err),
                },
                "DELETE" => match api::unit_delete_payload(&state, id) {
                    Ok(payload) => ok_json(payload),
                    Err(err) => unit_error_response(err),
                },
                _ => error_response(404, "Not Found", "Route not found"),
            }
        }
        ("GET", "/api/target") => match api::target_get_payload(&state) {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("PUT", "/api/target") => match api::target_put_payload(&state, body) {
            Ok(payload) => ok_json(payload),
            Err(err) => unit_error_response(err),
        },
        ("POST", "/api/calc") => match api::calc_payload(body) {
            Ok(payload) => ok_json(payload),
            Err(api::CalcPayloadError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::CalcPayloadError::Validation(validation)) => {
                validation_error_response(400, "Bad Request", validation)
            }
        },
        ("POST", "/api/sweep") => match api::sweep_post_payload(body) {
            Ok(payload) => ok_json(payload),
            Err(api::CalcPayloadError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::CalcPayloadError::Validation(validation)) => {
                validation_error_response(400, "Bad Request", validation)
            }
        },
        ("GET", "/api/sweep") => match api::sweep_get_payload(&state) {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/state/version") => match api::state_version_payload(&state) {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn unit_error_response(err: api::UnitPayloadError) -> HttpResponse {
    match err {
        api::UnitPayloadError::Parse(err) => {
            error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
        }
        api::UnitPayloadError::Validation(validation) => {
            validation_error_response(400, "Bad Request", validation)
        }
        api::UnitPayloadError::NotFound => error_response(404, "Not Found", "Unit not found"),
        api::UnitPayloadError::Io(err) => {
            error_response(500, "Internal Server Error", &err.to_string())
        }
    }
}

fn validation_error_response(
    status_code: u16,
    status_text: &'static str,
    payload: api::ValidationErrorResponse,
) -> HttpResponse {
    let fallback =
        "{\n  \"status\": \"error\",\n  \"message\": \"Validation failed\"\n}".to_string();

    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: serde_json::to_string_pretty(&payload).unwrap_or(fallback),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Mathhammer API Console</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 900px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 8px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { display:block; margin: 8px 0 4px; font-weight: 600; }
    textarea { width: 100%; min-height: 160px; padding: 8px; box-sizing: border-box; font-family: monospace; }
    button { margin-top: 12px; padding: 8px 14px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 180px; }
  </style>
</head>
<body>
  <h1>Mathhammer Local API</h1>
  <p>Browser console for the expected-damage endpoints.</p>

  <div class="card">
    <strong>Health</strong>
    <div><button id="health-btn">GET /api/health</button></div>
  </div>

  <div class="card">
    <strong>Calculate</strong>
    <label for="payload">Request body</label>
    <textarea id="payload">{
  "units": [
    {
      "name": "Spear Block",
      "profiles": [
        { "name": "Spears", "models": 10, "attacks": 2, "to_hit": 4, "to_wound": 4, "rend": 0, "damage": 1 }
      ]
    }
  ],
  "target": { "ward_needed": 0, "debuff_hit_enabled": false, "debuff_hit_value": 0 },
  "save": 4
}</textarea>
    <div>
      <button id="calc-btn">POST /api/calc</button>
      <button id="sweep-btn">POST /api/sweep</button>
    </div>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');
    const payloadEl = document.getElementById('payload');

    async function request(path, options) {
      output.textContent = 'Loading…';
      const response = await fetch(path, options);
      const text = await response.text();
      output.textContent = 'HTTP ' + response.status + '\n' + text;
    }

    document.getElementById('health-btn').addEventListener('click', () => {
      request('/api/health', { method: 'GET' });
    });

    document.getElementById('calc-btn').addEventListener('click', () => {
      request('/api/calc', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: payloadEl.value,
      });
    });

    document.getElementById('sweep-btn').addEventListener('click', () => {
      request('/api/sweep', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: payloadEl.value,
      });
    });
  </script>
</body>
</html>
"#
    .to_string()
}
