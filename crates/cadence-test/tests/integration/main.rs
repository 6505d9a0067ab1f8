mod expansion_laws;
mod forecast;
mod habits;
