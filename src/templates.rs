//! Scaffold file contents.
//!
//! Everything here is pure: a [`Backend`] goes in, text comes out. Writing
//! the text to disk is [`crate::writer`]'s job.

use crate::backend::Backend;
use crate::paths::project;

/// Placeholder replaced by the backend define.
const BACKEND_SLOT: &str = "@BACKEND@";

const MAIN_C: &str = "\
#define SOKOL_IMPL\n\
#define @BACKEND@\n\
#include \"sokol/sokol_gfx.h\"\n\
#include \"sokol/sokol_app.h\"\n\
#include \"sokol/sokol_log.h\"\n\
#include \"sokol/sokol_glue.h\"\n\
#include \"sokol/sokol_audio.h\"\n\
\n\
static void init(void) {\n\
\tsg_desc desc = { };\n\
\tdesc.environment = sglue_environment();\n\
\tdesc.logger.func = slog_func;\n\
\tsg_setup(&desc);\n\
}\n\
\n\
static void event(const sapp_event* e) {\n\
}\n\
\n\
static void frame(void) {\n\
\tchar window_title[64];\n\
\tsnprintf(window_title, sizeof(window_title), \"Standin Title\", (int) sapp_frame_count(), sapp_frame_duration()*1000.0);\n\
\tsapp_set_window_title(window_title);\n\
\tsg_pass_action pass_action = {\n\
\t\t.colors[0] = {\n\
\t\t\t.load_action = SG_LOADACTION_CLEAR,\n\
\t\t\t.clear_value = { 1.0f, 0.0f, 0.0f, 1.0f }\n\
\t\t}\n\
\t};\n\
\tsg_begin_pass(&(sg_pass){ .action = pass_action, .swapchain = sglue_swapchain()});\n\
\tsg_end_pass();\n\
\tsg_commit();\n\
}\n\
\n\
static void cleanup(void) {\n\
\tsg_shutdown();\n\
}\n\
\n\
sapp_desc sokol_main(int argc, char* argv[]) {\n\
\t(void)argc;\n\
\t(void)argv;\n\
\tsapp_desc desc = { };\n\
\tdesc.init_cb = init;\n\
\tdesc.frame_cb = frame;\n\
\tdesc.event_cb = event;\n\
\tdesc.cleanup_cb = cleanup;\n\
\tdesc.width = 1200;\n\
\tdesc.height = 800;\n\
\tdesc.window_title = \"Standin Title\";\n\
\tdesc.icon.sokol_default = true;\n\
\tdesc.logger.func = slog_func;\n\
\treturn desc;\n\
}\n";

const MAKEFILE: &str = "\
EMCC = emcc\n\
CFLAGS = -Wall -O2 -std=c99\n\
INCLUDES = -Isokol\n\
SOURCES_C = main.c\n\
\n\
\n\
LIBS = -lm -lopengl32 -lgdi32\n\
\n\
\n\
WASM_OBJS = $(SOURCES_C:.c=.wasm.o)\n\
\n\
wasm: CC=$(EMCC)\n\
wasm: CFLAGS += -D@BACKEND@ -s WASM=1 -s ALLOW_MEMORY_GROWTH=1 -sASSERTIONS -s ASYNCIFY\n\
wasm: LIBS=-sUSE_WEBGL2 -s ALLOW_MEMORY_GROWTH=1\n\
wasm: OUTPUT = sokol_out.html\n\
wasm: SHELL_FILE = sokol.html\n\
\n\
wasm: $(WASM_OBJS)\n\
\t$(EMCC) $(CFLAGS) $(INCLUDES) $^ -o sokol.js --shell-file $(SHELL_FILE) $(LIBS)\n\
\n\
\n\
%.o: %.c\n\
\t$(CC) $(CFLAGS) $(INCLUDES) -c $< -o $@\n\
\n\
%.wasm.o: %.c\n\
\t$(EMCC) $(CFLAGS) $(INCLUDES) -c $< -o $@\n";

const SHELL_HTML: &str = "\
<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
\t<link rel=\"stylesheet\" href=\"style.css\">\n\
\t<meta charset=\"UTF-8\">\n\
\t<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
\t<title>Sokol</title>\n\
</head>\n\
<body>\n\
\t<canvas id=\"canvas\"></canvas>\n\
\t<script src=\"sokol.js\"></script>\n\
</body>\n\
</html>\n";

const STYLE_CSS: &str = "\
#canvas {\n\
\theight: 100%;\n\
\twidth: 100%;\n\
}\n";

/// A scaffold file ready to be written, path relative to the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: &'static str,
    pub contents: String,
}

/// Application entry point with the backend define.
pub fn main_c(backend: Backend) -> String {
    MAIN_C.replace(BACKEND_SLOT, backend.identifier())
}

/// Makefile whose wasm target passes the backend as `-D`.
pub fn makefile(backend: Backend) -> String {
    MAKEFILE.replace(BACKEND_SLOT, backend.identifier())
}

pub fn shell_html() -> String {
    SHELL_HTML.to_string()
}

pub fn style_css() -> String {
    STYLE_CSS.to_string()
}

/// All four scaffold files, in the order they are written.
pub fn render_all(backend: Backend) -> Vec<RenderedFile> {
    vec![
        RenderedFile {
            path: project::MAIN_C,
            contents: main_c(backend),
        },
        RenderedFile {
            path: project::MAKEFILE,
            contents: makefile(backend),
        },
        RenderedFile {
            path: project::SHELL_HTML,
            contents: shell_html(),
        },
        RenderedFile {
            path: project::STYLE_CSS,
            contents: style_css(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_appears_once_in_main_c() {
        for backend in Backend::ALL {
            let src = main_c(backend);
            assert_eq!(src.matches(backend.identifier()).count(), 1, "{backend}");
            let second_line = src.lines().nth(1).unwrap();
            assert_eq!(second_line, format!("#define {}", backend.identifier()));
        }
    }

    #[test]
    fn test_identifier_appears_once_in_makefile() {
        for backend in Backend::ALL {
            let mk = makefile(backend);
            assert_eq!(mk.matches(backend.identifier()).count(), 1, "{backend}");
            let flag_line = mk
                .lines()
                .find(|l| l.starts_with("wasm: CFLAGS +="))
                .unwrap();
            assert!(flag_line.contains(&format!("-D{} ", backend.identifier())));
        }
    }

    #[test]
    fn test_no_placeholder_left_behind() {
        for file in render_all(Backend::Metal) {
            assert!(!file.contents.contains(BACKEND_SLOT), "{}", file.path);
        }
    }

    #[test]
    fn test_main_c_fixed_window_and_callbacks() {
        let src = main_c(Backend::GlCore);
        assert!(src.starts_with("#define SOKOL_IMPL\n"));
        assert!(src.contains("\tdesc.width = 1200;\n"));
        assert!(src.contains("\tdesc.height = 800;\n"));
        assert!(src.contains("\tdesc.window_title = \"Standin Title\";\n"));
        assert!(src.contains(".clear_value = { 1.0f, 0.0f, 0.0f, 1.0f }"));
        for cb in ["init_cb = init", "frame_cb = frame", "event_cb = event", "cleanup_cb = cleanup"] {
            assert!(src.contains(cb), "missing {cb}");
        }
    }

    #[test]
    fn test_makefile_recipes_use_tabs() {
        let mk = makefile(Backend::Wgpu);
        assert!(mk.contains("\n\t$(EMCC) $(CFLAGS) $(INCLUDES) $^ -o sokol.js"));
        assert!(mk.contains("wasm: SHELL_FILE = sokol.html\n"));
        assert!(mk.contains("LIBS = -lm -lopengl32 -lgdi32\n"));
    }

    #[test]
    fn test_shell_links_stylesheet_canvas_and_script() {
        let html = shell_html();
        assert!(html.contains("href=\"style.css\""));
        assert!(html.contains("<canvas id=\"canvas\"></canvas>"));
        assert!(html.contains("<script src=\"sokol.js\"></script>"));
    }

    #[test]
    fn test_stylesheet_fills_container() {
        assert_eq!(style_css(), "#canvas {\n\theight: 100%;\n\twidth: 100%;\n}\n");
    }

    #[test]
    fn test_render_all_order() {
        let paths: Vec<_> = render_all(Backend::NoApi).iter().map(|f| f.path).collect();
        assert_eq!(paths, ["main.c", "Makefile", "sokol.html", "style.css"]);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        assert_eq!(render_all(Backend::D3d11), render_all(Backend::D3d11));
    }
}
