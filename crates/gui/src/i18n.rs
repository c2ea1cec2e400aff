use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lang {
    #[default]
    Ru,
    En,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Ru,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Ru => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        "app.title" => if ru { "Каталог PLM" } else { "PLM Catalog" },

        // ── Search bar ──────────────────────────────────────
        "search.hint" => if ru { "Название детали" } else { "Part name" },
        "btn.search" => if ru { "Искать" } else { "Search" },
        "btn.find_all" => if ru { "Найти все" } else { "Find All" },
        "btn.save" => if ru { "Сохранить" } else { "Save" },
        "btn.supersystem" => if ru { "К надсистеме" } else { "Go to supersystem" },
        "btn.subsystem" => if ru { "К подсистеме" } else { "Go to subsystem" },
        "btn.load" => if ru { "Загрузить" } else { "Load" },
        "btn.load_current" => if ru { "Загрузить в текущий документ" } else { "Load in current document" },
        "btn.navigate_current" => if ru { "Переходить в текущем документе" } else { "Navigate in current document" },
        "btn.import_brep" => if ru { "Импорт BREP…" } else { "Import BREP…" },

        "tip.save" => if ru { "Отправить выбранный объект в каталог" } else { "Upload the selected object to the catalog" },
        "tip.supersystem" => if ru { "Открыть родительский объект" } else { "Open the parent object" },
        "tip.subsystem" => if ru { "Открыть дочерний объект" } else { "Open a child object" },
        "tip.load_current" => if ru { "Добавить выбранную строку в активный документ" } else { "Add the selected row to the active document" },
        "tip.navigate_current" => if ru { "Надсистема и подсистема добавляются в активный документ" } else { "Supersystem and subsystem are added to the active document" },

        // ── Result tree ─────────────────────────────────────
        "tree.results" => if ru { "Результаты" } else { "Results" },
        "tree.no_results" => if ru { "Ничего не найдено." } else { "Nothing found." },
        "tree.not_searched" => if ru { "Введите название и нажмите «Искать»." } else { "Enter a name and press Search." },

        // ── Documents ───────────────────────────────────────
        "docs.title" => if ru { "Документы" } else { "Documents" },
        "docs.none" => if ru { "Нет открытых документов." } else { "No open documents." },
        "docs.tagged" => if ru { "в каталоге" } else { "in catalog" },

        // ── Messages ────────────────────────────────────────
        "msg.no_subsystems" => if ru { "Нет подсистем" } else { "No subsystems" },
        "msg.no_supersystems" => if ru { "Нет надсистем" } else { "No supersystems" },
        "msg.created" => if ru { "Объект создан" } else { "Object created" },
        "msg.updated" => if ru { "Объект обновлён" } else { "Object updated" },
        "msg.no_row_selected" => if ru { "Выберите строку в результатах" } else { "Select a row in the results" },
        "msg.no_objects_named" => if ru { "Объекты с таким названием не найдены!" } else { "No objects found with this name!" },
        "msg.no_objects" => if ru { "Объекты не найдены!" } else { "No objects found!" },

        "notice.info" => if ru { "Сообщение" } else { "Message" },
        "notice.warning" => if ru { "Предупреждение" } else { "Warning" },
        "notice.error" => if ru { "Ошибка" } else { "Error" },
        "notice.ok" => if ru { "ОК" } else { "OK" },

        "choose.up" => if ru { "Выберите надсистему" } else { "Choose a supersystem" },
        "choose.down" => if ru { "Выберите подсистему" } else { "Choose a subsystem" },
        "choose.cancel" => if ru { "Отмена" } else { "Cancel" },

        "dialog.import_title" => if ru { "Открыть BREP" } else { "Open BREP" },

        // ── Settings ────────────────────────────────────────
        "menu.settings" => if ru { "Настройки" } else { "Settings" },
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.server" => if ru { "Сервер" } else { "Server" },
        "settings.host" => if ru { "Хост" } else { "Host" },
        "settings.port" => if ru { "Порт" } else { "Port" },
        "settings.author" => if ru { "Автор" } else { "Author" },
        "settings.restart" => if ru { "Адрес сервера применяется после перезапуска" } else { "The server address applies after restart" },
        "settings.ui" => if ru { "Интерфейс" } else { "Interface" },
        "settings.language" => if ru { "Язык" } else { "Language" },
        "settings.font_size" => if ru { "Размер шрифта" } else { "Font size" },
        "settings.reset" => if ru { "Сбросить" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}
