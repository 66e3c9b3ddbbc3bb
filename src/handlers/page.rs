//! Server-rendered registration page: the form plus the table of stored records.

use crate::domain::{City, Gender, Registro};
use crate::service::RegistroService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Html};

/// GET /: render all records. A store failure still renders the page, with an empty table and status 500.
pub async fn index(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    match RegistroService::get_all(&state.pool).await {
        Ok(rows) => (StatusCode::OK, Html(render_page(&rows))),
        Err(e) => {
            tracing::error!(error = %e, "failed to load registros for page");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(render_page(&[])))
        }
    }
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(rows: &[Registro]) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>Registro de Ciudadanos</title>
<link rel="stylesheet" href="/style.css">
</head>
<body>
<h1>Registro de Ciudadanos</h1>
"#,
    );
    html.push_str(&render_form());
    html.push_str(&render_table(rows));
    html.push_str("<script src=\"/script.js\"></script>\n</body>\n</html>\n");
    html
}

fn render_form() -> String {
    let mut html = String::from(
        r#"<form id="formulario">
<h2 id="form-title">Nuevo Registro</h2>
<label for="dni">DNI:</label>
<input id="dni" name="dni" maxlength="10">
<span class="error" id="error-dni"></span>
<label for="nombres">Nombres:</label>
<input id="nombres" name="nombres">
<span class="error" id="error-nombres"></span>
<label for="apellidos">Apellidos:</label>
<input id="apellidos" name="apellidos">
<span class="error" id="error-apellidos"></span>
<label for="fechaNacimiento">Fecha de nacimiento:</label>
<input type="date" id="fechaNacimiento" name="fechaNacimiento">
<span class="error" id="error-fechaNacimiento"></span>
<fieldset><legend>Género:</legend>
"#,
    );
    for g in Gender::ALL {
        html.push_str(&format!(
            "<label><input type=\"radio\" name=\"genero\" value=\"{0}\"> {0}</label>\n",
            g.as_str()
        ));
    }
    html.push_str(
        r#"</fieldset>
<span class="error" id="error-genero"></span>
<label for="ciudad">Ciudad:</label>
<select id="ciudad" name="ciudad">
<option value="" disabled selected>Seleccione una ciudad</option>
"#,
    );
    for c in City::ALL {
        html.push_str(&format!("<option value=\"{0}\">{0}</option>\n", c.as_str()));
    }
    html.push_str(
        r#"</select>
<span class="error" id="error-ciudad"></span>
<button type="submit" id="btn-submit" class="btn-agregar">Agregar Registro</button>
<button type="button" id="btn-cancelar" style="display:none">Cancelar</button>
</form>
"#,
    );
    html
}

fn render_table(rows: &[Registro]) -> String {
    let mut html = String::from("<h2>Registros</h2>\n");
    if rows.is_empty() {
        html.push_str("<p class=\"vacio\">No hay registros</p>\n");
        return html;
    }
    html.push_str(
        "<table>\n<thead><tr><th>DNI</th><th>Nombres</th><th>Apellidos</th><th>Fecha de nacimiento</th>\
         <th>Género</th><th>Ciudad</th><th>Acciones</th></tr></thead>\n<tbody>\n",
    );
    for r in rows {
        html.push_str(&format!(
            "<tr data-id=\"{id}\"><td>{dni}</td><td>{nombres}</td><td>{apellidos}</td><td>{fecha}</td><td>{genero}</td><td>{ciudad}</td>\
             <td><button onclick=\"editarRegistro({id})\">Editar</button>\
             <button onclick=\"eliminarRegistro({id})\">Eliminar</button></td></tr>\n",
            id = r.id,
            dni = escape_html(&r.dni),
            nombres = escape_html(&r.nombres),
            apellidos = escape_html(&r.apellidos),
            fecha = r.fecha_nacimiento.format("%Y-%m-%d"),
            genero = escape_html(&r.genero),
            ciudad = escape_html(&r.ciudad),
        ));
    }
    html.push_str("</tbody>\n</table>\n");
    html
}
