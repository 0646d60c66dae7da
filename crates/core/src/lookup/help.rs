//! The `!ayuda` help message.

use poroherald_domain::{color, Embed, Message};

/// Help embed listing both command families.
pub fn help_message() -> Message {
    let patch_commands = "`p!parche` - Información del último **parche**.\n\
        `p!campeones` - Lista de **campeones** con cambios.\n\
        `p!ver <campeón>` - Cambios detallados del **campeón**.\n\
        `p!objetos` - Cambios a **objetos**.\n\
        `p!runas` - Cambios a **runas**.\n\
        `p!siguiente` - Muestra el **siguiente parche** programado.\n\
        `p!calendario` - Visualiza el **calendario de parches** futuros.";

    let clash_commands = "`c!clash` - Próximo **Clash**.\n\
        `c!calendario` - **Calendario** de Clash futuros.\n\
        `c!horarios` - **Horarios** fase de confirmación.\n\
        `c!premios` - Despliega los **premios**.";

    Message::embed(
        Embed::new()
            .title("Ayuda - El Rincón del Poro")
            .description("Comandos disponibles:")
            .color(color::DARK_GREEN)
            .field("--- 📜 Comandos de Parche ---", patch_commands)
            .field("--- 🏆 Comandos de Clash ---", clash_commands),
    )
}
